//! Core data models for pocket-ledger
//!
//! This module contains the data structures of the ledger domain: the
//! category taxonomy and the records filed against it.

pub mod category;
pub mod record;

pub use category::{default_categories, CategoryNode, CategoryTaxonomy};
pub use record::Record;
