//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use crate::error::LedgerError;

/// Read a file's raw bytes, returning `None` if the file doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> Result<Option<Vec<u8>>, LedgerError> {
    let path = path.as_ref();

    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(LedgerError::Storage(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Write text to a file atomically (write to temp, then rename)
///
/// The file is either completely replaced or not modified at all.
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), LedgerError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LedgerError::Storage(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    // Temp file must sit in the same directory for the rename to be atomic
    let temp_path = path.with_extension("tmp");

    let file = File::create(&temp_path)
        .map_err(|e| LedgerError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| LedgerError::Storage(format!("Failed to write data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| LedgerError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| LedgerError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        LedgerError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Remove a file, treating an already-missing file as success
pub fn remove_if_exists<P: AsRef<Path>>(path: P) -> Result<(), LedgerError> {
    let path = path.as_ref();

    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(LedgerError::Storage(format!(
            "Failed to remove {}: {}",
            path.display(),
            e
        ))),
    }
}
