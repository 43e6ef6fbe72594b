//! Ledger persistence as JSON
//!
//! A missing or unreadable file means "start empty". A file that reads but
//! does not parse is `CorruptState`, which callers must treat as fatal.

use std::path::Path;

use crate::core::error::Result;
use crate::ledger::Ledger;

impl Ledger {
    /// Serialize the ledger to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a ledger from JSON and normalise it
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_json_bytes(json.as_bytes())
    }

    /// Parse a ledger from raw file contents; invalid UTF-8 is corrupt state
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self> {
        let mut ledger: Ledger = serde_json::from_slice(bytes)?;
        let report = ledger.normalize();
        if !report.is_clean() {
            for (city, good) in &report.zero_buildings {
                tracing::warn!("Dropped zero-count building [{}] in city [{}]", good, city);
            }
            for city in &report.cities_removed {
                tracing::warn!("Dropped city [{}] without buildings", city);
            }
            for index in &report.groups_removed {
                tracing::warn!("Dropped group [{}] without cities", index);
            }
        }
        Ok(ledger)
    }
}

/// Load a ledger from disk, starting empty when the file cannot be read
///
/// Only the read itself may fail softly. Content that was read but does not
/// parse, including invalid UTF-8, is returned as `CorruptState`.
pub fn load(path: &Path) -> Result<Ledger> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No ledger at {}, starting empty", path.display());
            return Ok(Ledger::new());
        }
        Err(e) => {
            tracing::warn!("Could not read ledger at {} ({}), starting empty", path.display(), e);
            return Ok(Ledger::new());
        }
    };

    let ledger = Ledger::from_json_bytes(&content)?;
    tracing::info!(
        "Loaded {} cities and {} groups from {}",
        ledger.cities().len(),
        ledger.groups().len(),
        path.display()
    );
    Ok(ledger)
}

/// Write the ledger to disk
///
/// The file is written next to its destination first and then renamed over
/// it, so an interrupted save leaves the previous file intact.
pub fn save(ledger: &Ledger, path: &Path) -> Result<()> {
    let json = ledger.to_json()?;
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    std::fs::write(&staging, json)?;
    std::fs::rename(&staging, path)?;
    tracing::info!("Saved ledger to {}", path.display());
    Ok(())
}
