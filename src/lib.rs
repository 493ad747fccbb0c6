//! pocket-ledger - Terminal-based personal income and expense ledger
//!
//! Records are filed under a fixed category tree and kept in a plain-text
//! file together with the running balance.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and settings (including the category tree)
//! - `error`: Custom error types
//! - `models`: Records and the category taxonomy
//! - `storage`: Plain-text ledger file with atomic writes
//! - `services`: The ledger and its balance invariant
//! - `audit`: Append-only log of ledger changes
//! - `display`: Terminal formatting
//! - `cli`: Interactive shell and one-shot commands
//!
//! # Example
//!
//! ```rust
//! use pocket_ledger::models::CategoryTaxonomy;
//! use pocket_ledger::services::Ledger;
//!
//! let taxonomy = CategoryTaxonomy::default();
//! let mut ledger = Ledger::new(100);
//! ledger.add("meal lunch -20, salary job 1000", &taxonomy).unwrap();
//!
//! let food = ledger.find(&taxonomy.descendants_of("food"));
//! assert_eq!(food.total, -20);
//! assert_eq!(ledger.balance(), 1080);
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
