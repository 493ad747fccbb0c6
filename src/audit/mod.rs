//! Audit logging for pocket-ledger
//!
//! Every committed ledger change (add, delete, reset of a corrupt file,
//! save) is appended to a line-delimited JSON log next to the ledger file.
//!
//! - `AuditEntry`: one logged operation with its records and resulting balance
//! - `AuditLogger`: appends entries and reads them back for `history`

mod entry;
mod logger;

pub use entry::{AuditEntry, Operation};
pub use logger::AuditLogger;
