//! User settings for pocket-ledger
//!
//! Settings carry the category tree (fixed for the lifetime of a process)
//! and the audit log switch.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::category::{default_categories, CategoryNode, CategoryTaxonomy};

/// User settings for pocket-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Category tree definition
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryNode>,

    /// Whether ledger changes are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            categories: default_categories(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Build the category taxonomy described by these settings
    pub fn taxonomy(&self) -> Result<CategoryTaxonomy, LedgerError> {
        CategoryTaxonomy::new(self.categories.clone())
    }
}
