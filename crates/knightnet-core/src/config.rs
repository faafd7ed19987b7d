//! Layered configuration.
//!
//! Sources, lowest priority first:
//! 1. compiled defaults
//! 2. a TOML file (`knightnet.toml` unless a path is given)
//! 3. `KNIGHTNET_*` environment variables, `__` separating nested keys
//!    (e.g. `KNIGHTNET_MST__MAX_VISIBILITY=6`)

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::loader::LoadPolicy;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "knightnet.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "KNIGHTNET_";

/// Default visibility ceiling.
pub const DEFAULT_MAX_VISIBILITY: i64 = 7;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnightNetConfig {
    /// Spanning tree settings.
    pub mst: MstConfig,
    /// Record loading settings.
    pub load: LoadConfig,
    /// Breach simulation settings.
    pub breach: BreachConfig,
    /// Fixed cases for a suite run.
    pub cases: Vec<CaseConfig>,
}

/// Spanning tree settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MstConfig {
    /// Edges above this visibility are never used.
    pub max_visibility: i64,
    /// Node to grow the tree from. Defaults to the smallest real node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_node: Option<String>,
}

impl Default for MstConfig {
    fn default() -> Self {
        Self {
            max_visibility: DEFAULT_MAX_VISIBILITY,
            start_node: None,
        }
    }
}

/// Record loading settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Malformed row handling.
    pub policy: LoadPolicy,
}

/// Breach simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BreachConfig {
    /// Seed for picking the breached node.
    pub seed: u64,
    /// Fixed node to breach instead of a seeded pick.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node: Option<String>,
}

/// One fixed suite case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseConfig {
    /// Record file, relative to the working directory.
    pub input: PathBuf,
    /// Visibility ceiling for this case.
    pub max_visibility: i64,
}

impl KnightNetConfig {
    /// Builds the layered figment without extracting it.
    ///
    /// A missing TOML file is not an error; its layer is simply empty.
    #[must_use]
    pub fn figment(path: Option<&Path>) -> Figment {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), Path::to_path_buf);
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads and validates the configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        tracing::debug!(
            max_visibility = config.mst.max_visibility,
            policy = ?config.load.policy,
            cases = config.cases.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Rejects values no run can use.
    ///
    /// Visibility ceilings are plain integers; a negative ceiling is valid and
    /// only admits edges with an equally low visibility.
    pub fn validate(&self) -> Result<()> {
        for (idx, case) in self.cases.iter().enumerate() {
            if case.input.as_os_str().is_empty() {
                return Err(Error::InvalidConfig(format!("cases[{idx}].input is empty")));
            }
        }
        Ok(())
    }
}
