//! Record repository for the plain-text ledger file
//!
//! File layout:
//!
//! ```text
//! <balance>
//! <category> <description> <amount>
//! ...
//! ```
//!
//! The first line is the current balance. Every other line must have exactly
//! three whitespace-separated fields, an integer amount and a known
//! category; a single bad line invalidates the whole file.

use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::models::record::split_fields;
use crate::models::{CategoryTaxonomy, Record};

use super::file_io::{read_optional, remove_if_exists, write_text_atomic};

/// Result of reading the ledger file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File parsed cleanly
    Found { balance: i64, records: Vec<Record> },
    /// No file on disk
    Missing,
    /// File exists but violates the format
    Corrupt(LedgerError),
}

/// Repository for the ledger file
pub struct RecordRepository {
    path: PathBuf,
}

impl RecordRepository {
    /// Create a new record repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the ledger file
    ///
    /// Format problems are reported as `LoadOutcome::Corrupt`; only genuine
    /// I/O failures are returned as errors.
    pub fn load(&self, taxonomy: &CategoryTaxonomy) -> LedgerResult<LoadOutcome> {
        let bytes = match read_optional(&self.path)? {
            Some(bytes) => bytes,
            None => return Ok(LoadOutcome::Missing),
        };

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(_) => {
                return Ok(LoadOutcome::Corrupt(LedgerError::corrupt(
                    1,
                    "file is not valid UTF-8",
                )))
            }
        };

        Ok(match parse_ledger(&text, taxonomy) {
            Ok((balance, records)) => LoadOutcome::Found { balance, records },
            Err(err) => LoadOutcome::Corrupt(err),
        })
    }

    /// Replace the ledger file with already rendered contents
    pub fn save(&self, contents: &str) -> LedgerResult<()> {
        write_text_atomic(&self.path, contents)
    }

    /// Delete the ledger file
    pub fn quarantine(&self) -> LedgerResult<()> {
        remove_if_exists(&self.path)
    }
}

/// Parse ledger file contents
///
/// Returns `CorruptPersistedState` naming the first offending line.
pub fn parse_ledger(text: &str, taxonomy: &CategoryTaxonomy) -> LedgerResult<(i64, Vec<Record>)> {
    let mut lines = text.lines();

    let first = lines.next().unwrap_or("").trim();
    let balance = first
        .parse::<i64>()
        .map_err(|_| LedgerError::corrupt(1, format!("balance '{}' is not an integer", first)))?;

    let mut records = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line_no = idx + 2;

        let (category, description, amount) = split_fields(line).ok_or_else(|| {
            LedgerError::corrupt(
                line_no,
                format!(
                    "expected 3 fields, found {}",
                    line.split_whitespace().count()
                ),
            )
        })?;

        if !taxonomy.is_valid(category) {
            return Err(LedgerError::corrupt(
                line_no,
                format!("unknown category '{}'", category),
            ));
        }

        let amount = amount.parse::<i64>().map_err(|_| {
            LedgerError::corrupt(line_no, format!("amount '{}' is not an integer", amount))
        })?;

        records.push(Record::new(category, description, amount));
    }

    Ok((balance, records))
}

/// Render ledger state in the file layout
pub fn render_ledger(balance: i64, records: &[Record]) -> String {
    let mut output = format!("{}\n", balance);
    for record in records {
        output.push_str(&format!("{}\n", record));
    }
    output
}
