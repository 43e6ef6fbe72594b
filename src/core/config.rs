//! Ledger configuration
//!
//! Values come from three layers, later ones winning: built-in defaults,
//! an optional TOML file, then command-line flags applied by the binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::error::{LedgerError, Result};

/// Default location of the persisted ledger
pub const DEFAULT_DATA_PATH: &str = "harbor_ledger.json";

/// Default tracing filter when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER: &str = "harbor_ledger=info";

/// Runtime configuration for the ledger binary
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LedgerConfig {
    /// JSON file the ledger is loaded from and saved to
    pub data_path: PathBuf,

    /// Optional TOML recipe table replacing the built-in one
    pub recipes_path: Option<PathBuf>,

    /// Emit ANSI colors for balances
    pub color: bool,

    /// `EnvFilter` directive for logging
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            recipes_path: None,
            color: true,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Parse configuration from a TOML string; missing keys keep defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }
}
