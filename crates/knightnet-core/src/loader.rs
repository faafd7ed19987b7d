//! Record-file loader.
//!
//! Each row is `nodeA, nodeB, cost, visibility, isDecoy` with no header.
//! Rows are decoded completely before any graph is built, so a bad row
//! never leaves a half-populated graph behind.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::EdgeRecord;

/// Number of fields in a well-formed row.
pub const FIELD_COUNT: usize = 5;

/// What to do with a malformed row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Record the problem in the [`LoadReport`] and keep going.
    #[default]
    Skip,
    /// Stop at the first malformed row with [`Error::MalformedRecord`].
    Abort,
}

/// A row that was skipped under [`LoadPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadError {
    /// 1-based line number.
    pub line: u64,
    /// What was wrong with the row.
    pub reason: String,
}

/// Rows decoded from a source plus the rows that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Successfully decoded records, in source order.
    pub records: Vec<EdgeRecord>,
    /// Malformed rows that were skipped.
    pub skipped: Vec<LoadError>,
}

impl LoadReport {
    /// Returns true if every non-blank row decoded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Reads records from a file.
pub fn load_records(path: impl AsRef<Path>, policy: LoadPolicy) -> Result<LoadReport> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let report = parse_records(file, policy)?;
    tracing::debug!(
        path = %path.display(),
        records = report.records.len(),
        skipped = report.skipped.len(),
        "record file loaded"
    );
    Ok(report)
}

/// Reads records from any byte source.
pub fn parse_records<R: Read>(source: R, policy: LoadPolicy) -> Result<LoadReport> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let mut report = LoadReport::default();
    // Invalid UTF-8 is a malformed row, not a reader error.
    for row in reader.byte_records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);
        let decoded = match StringRecord::from_byte_record(row) {
            Ok(row) if is_blank(&row) => continue,
            Ok(row) => decode_row(&row),
            Err(err) => Err(format!(
                "field {} is not valid UTF-8",
                err.utf8_error().field() + 1
            )),
        };

        match decoded {
            Ok(record) => report.records.push(record),
            Err(reason) => match policy {
                LoadPolicy::Abort => return Err(Error::MalformedRecord { line, reason }),
                LoadPolicy::Skip => {
                    tracing::warn!(line, %reason, "skipping malformed record");
                    report.skipped.push(LoadError { line, reason });
                }
            },
        }
    }
    Ok(report)
}

fn is_blank(row: &StringRecord) -> bool {
    row.iter().all(str::is_empty)
}

fn decode_row(row: &StringRecord) -> std::result::Result<EdgeRecord, String> {
    if row.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            row.len()
        ));
    }

    let node_a = node_field(row, 0, "nodeA")?;
    let node_b = node_field(row, 1, "nodeB")?;
    let cost = int_field(row, 2, "cost")?;
    let visibility = int_field(row, 3, "visibility")?;
    let is_decoy = bool_field(row, 4)?;

    Ok(EdgeRecord::new(node_a, node_b, cost, visibility, is_decoy))
}

fn node_field<'r>(
    row: &'r StringRecord,
    idx: usize,
    name: &str,
) -> std::result::Result<&'r str, String> {
    match row.get(idx) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{name} is empty")),
    }
}

fn int_field(row: &StringRecord, idx: usize, name: &str) -> std::result::Result<i64, String> {
    let raw = row.get(idx).unwrap_or_default();
    raw.parse::<i64>()
        .map_err(|_| format!("{name} is not an integer: {raw:?}"))
}

fn bool_field(row: &StringRecord, idx: usize) -> std::result::Result<bool, String> {
    let raw = row.get(idx).unwrap_or_default();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("isDecoy is not a boolean: {raw:?}"))
    }
}
