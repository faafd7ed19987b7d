//! Error types for knightnet-core.
//!
//! Infeasible spanning trees and removal of absent nodes are ordinary
//! outcomes and are reported through return values, not through [`Error`].

use thiserror::Error;

/// Core error types.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error while opening or reading a record source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Low-level CSV reader failure (invalid UTF-8, broken quoting).
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A record row could not be decoded and the load policy is abort.
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord {
        /// 1-based line number in the source.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// Configuration could not be extracted from its sources.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration was extracted but holds an unusable value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
