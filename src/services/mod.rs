//! Service layer for pocket-ledger
//!
//! Business logic sits between the CLI and storage: the ledger enforces the
//! balance invariant and all-or-nothing mutations.

pub mod ledger;

pub use ledger::{FindResult, Initialized, Ledger, LedgerOrigin};
