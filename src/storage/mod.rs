//! Storage layer for pocket-ledger
//!
//! Provides the plain-text ledger file with atomic writes, plus the optional
//! audit log that records every committed change.

pub mod file_io;
pub mod records;

pub use file_io::{read_optional, remove_if_exists, write_text_atomic};
pub use records::{LoadOutcome, RecordRepository};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::error::LedgerError;

/// Main storage coordinator
pub struct Storage {
    paths: LedgerPaths,
    pub records: RecordRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths, audit_enabled: bool) -> Result<Self, LedgerError> {
        paths.ensure_directories()?;

        let audit = audit_enabled.then(|| AuditLogger::new(paths.audit_log()));

        Ok(Self {
            records: RecordRepository::new(paths.records_file()),
            audit,
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    /// The audit logger, if auditing is enabled
    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Append an entry to the audit log (no-op when auditing is disabled)
    pub fn log(&self, entry: &AuditEntry) -> Result<(), LedgerError> {
        match &self.audit {
            Some(logger) => logger.log(entry),
            None => Ok(()),
        }
    }
}
