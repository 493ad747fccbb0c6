//! Path management for pocket-ledger
//!
//! The ledger lives in a single data directory, one ledger per directory.
//!
//! ## Path Resolution Order
//!
//! 1. Explicit directory passed on the command line (`--dir`)
//! 2. `POCKET_LEDGER_DIR` environment variable (if set)
//! 3. The current working directory

use std::path::PathBuf;

use crate::error::LedgerError;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "POCKET_LEDGER_DIR";

/// Manages all paths used by pocket-ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    /// Directory holding the ledger, settings and audit log
    base_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve the data directory
    ///
    /// # Errors
    ///
    /// Returns an error if no override is given and the current working
    /// directory cannot be determined.
    pub fn new(dir_override: Option<PathBuf>) -> Result<Self, LedgerError> {
        let base_dir = match dir_override {
            Some(dir) => dir,
            None => match std::env::var(DATA_DIR_ENV) {
                Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
                _ => std::env::current_dir().map_err(|e| {
                    LedgerError::Config(format!("Could not determine working directory: {}", e))
                })?,
            },
        };

        Ok(Self { base_dir })
    }

    /// Create LedgerPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the ledger file (records.txt)
    pub fn records_file(&self) -> PathBuf {
        self.base_dir.join("records.txt")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("pocket.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("pocket-audit.log")
    }

    /// Ensure the data directory exists
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LedgerError::Io(format!("Failed to create data directory: {}", e)))
    }

    /// Check if a ledger has been saved in this directory
    pub fn has_ledger(&self) -> bool {
        self.records_file().exists()
    }
}
