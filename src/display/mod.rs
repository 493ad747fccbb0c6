//! Display formatting for terminal output
//!
//! Pure functions that turn ledger state into text; printing is left to the
//! CLI layer.

pub mod category;
pub mod history;
pub mod record;

pub use category::format_category_tree;
pub use history::{format_audit_entry, format_history};
pub use record::{format_find_result, format_ledger_view, format_record_table};
