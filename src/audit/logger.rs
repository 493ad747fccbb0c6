//! Append-only audit log
//!
//! One JSON object per line. A torn or hand-edited line only loses that
//! entry; the rest of the history stays readable.

use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::PathBuf;

use tracing::warn;

use crate::error::LedgerResult;
use crate::storage::file_io::read_optional;

use super::entry::AuditEntry;

/// Writer and reader for the ledger's JSONL audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append an entry as a single line
    ///
    /// A torn last line is terminated first so the new entry starts on a
    /// line of its own.
    pub fn log(&self, entry: &AuditEntry) -> LedgerResult<()> {
        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&self.log_path)?;

        if file.metadata()?.len() > 0 {
            let mut last = [0u8; 1];
            file.seek(SeekFrom::End(-1))?;
            file.read_exact(&mut last)?;
            if last[0] != b'\n' {
                line.insert(0, '\n');
            }
        }

        file.write_all(line.as_bytes())?;

        Ok(())
    }

    /// Every readable entry, oldest first
    ///
    /// Lines that fail to parse are skipped with a warning.
    pub fn read_all(&self) -> LedgerResult<Vec<AuditEntry>> {
        let bytes = match read_optional(&self.log_path)? {
            Some(bytes) => bytes,
            None => return Ok(Vec::new()),
        };

        let text = String::from_utf8_lossy(&bytes);
        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(idx, line)| match serde_json::from_str(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "skipping unreadable audit entry");
                    None
                }
            })
            .collect();

        Ok(entries)
    }

    /// The last `limit` readable entries, oldest first
    pub fn read_recent(&self, limit: usize) -> LedgerResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let start = entries.len().saturating_sub(limit);
        entries.drain(..start);
        Ok(entries)
    }
}
