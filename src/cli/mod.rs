//! CLI command handlers
//!
//! This module contains the interactive shell and the one-shot commands,
//! bridging terminal input with the ledger service.

pub mod console;
pub mod ledger;
pub mod shell;

pub use console::Console;
pub use ledger::{handle_ledger_command, LedgerCommands};
pub use shell::{run_shell, show_history, ShellCommand};

use crate::config::{LedgerPaths, Settings};
use crate::error::LedgerResult;
use crate::models::CategoryTaxonomy;
use crate::storage::Storage;

/// Everything a command needs: settings, storage and the category tree
pub struct Context {
    pub settings: Settings,
    pub storage: Storage,
    pub taxonomy: CategoryTaxonomy,
}

impl Context {
    /// Resolve settings and storage for a data directory
    pub fn load(paths: LedgerPaths) -> LedgerResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let taxonomy = settings.taxonomy()?;
        let storage = Storage::new(paths, settings.audit_enabled)?;

        Ok(Self {
            settings,
            storage,
            taxonomy,
        })
    }

    pub fn paths(&self) -> &LedgerPaths {
        self.storage.paths()
    }
}
