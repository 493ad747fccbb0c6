//! Custom error types for pocket-ledger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for ledger operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// An `add` triple did not have exactly three fields
    #[error(
        "The format of the records should be like this: meal breakfast -50, salary job 100, ...\n\
         Invalid entry: '{0}'"
    )]
    MalformedBatch(String),

    /// Category is not part of the taxonomy
    #[error("Category '{0}' is not in the category list. Use \"view categories\" to see it.")]
    UnknownCategory(String),

    /// Amount field could not be parsed as an integer
    #[error("Invalid value for money: '{0}'")]
    NonIntegerAmount(String),

    /// Delete position could not be parsed as an integer
    #[error("Invalid record number: '{0}'")]
    NonIntegerPosition(String),

    /// Delete position is outside the current record list
    #[error("There's no record with the record number {position} (have {len} records)")]
    PositionOutOfRange { position: i64, len: usize },

    /// The persisted ledger file violates the line format
    #[error("Invalid format in ledger file at line {line}: {reason}")]
    CorruptPersistedState { line: usize, reason: String },

    /// Opening balance supplied by the user was not an integer
    #[error("Invalid value for money: '{0}'. Set to 0 by default.")]
    NonIntegerOpeningBalance(String),

    /// Balance arithmetic left the representable range
    #[error("Amount out of range: balance would overflow")]
    AmountOverflow,

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl LedgerError {
    /// Create a corrupt-state error for a given 1-based line number
    pub fn corrupt(line: usize, reason: impl Into<String>) -> Self {
        Self::CorruptPersistedState {
            line,
            reason: reason.into(),
        }
    }

    /// Whether this error is a user-input problem the session recovers from.
    ///
    /// Anything else (I/O, storage, config) is surfaced as a failure of the
    /// command itself.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedBatch(_)
                | Self::UnknownCategory(_)
                | Self::NonIntegerAmount(_)
                | Self::NonIntegerPosition(_)
                | Self::PositionOutOfRange { .. }
                | Self::CorruptPersistedState { .. }
                | Self::NonIntegerOpeningBalance(_)
                | Self::AmountOverflow
        )
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type LedgerResult<T> = Result<T, LedgerError>;
