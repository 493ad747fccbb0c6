//! Audit entry data structures
//!
//! Defines the structure of audit log entries: what happened to the ledger,
//! which records were involved and the balance afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Record;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// A batch of records was added
    Add,
    /// A record was deleted
    Delete,
    /// A corrupt ledger file was discarded
    Reset,
    /// The ledger was written to disk
    Save,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Add => write!(f, "ADD"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Reset => write!(f, "RESET"),
            Operation::Save => write!(f, "SAVE"),
        }
    }
}

/// A single audit log entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// Type of operation performed
    pub operation: Operation,

    /// 1-based position of a deleted record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,

    /// Records added or removed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<Record>,

    /// Balance after the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,

    /// Free-form detail (e.g. why a file was reset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl AuditEntry {
    fn new(operation: Operation) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            position: None,
            records: Vec::new(),
            balance: None,
            detail: None,
        }
    }

    /// Entry for a committed add batch
    pub fn add(records: &[Record], balance: i64) -> Self {
        Self {
            records: records.to_vec(),
            balance: Some(balance),
            ..Self::new(Operation::Add)
        }
    }

    /// Entry for a deleted record
    pub fn delete(position: usize, record: &Record, balance: i64) -> Self {
        Self {
            position: Some(position),
            records: vec![record.clone()],
            balance: Some(balance),
            ..Self::new(Operation::Delete)
        }
    }

    /// Entry for a discarded ledger file
    pub fn reset(reason: impl Into<String>) -> Self {
        Self {
            detail: Some(reason.into()),
            ..Self::new(Operation::Reset)
        }
    }

    /// Entry for a ledger save
    pub fn save(balance: i64, record_count: usize) -> Self {
        Self {
            balance: Some(balance),
            detail: Some(format!("{} records", record_count)),
            ..Self::new(Operation::Save)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_entry() {
        let records = vec![Record::new("meal", "lunch", -20)];
        let entry = AuditEntry::add(&records, 80);

        assert_eq!(entry.operation, Operation::Add);
        assert_eq!(entry.records, records);
        assert_eq!(entry.balance, Some(80));
        assert!(entry.position.is_none());
    }

    #[test]
    fn test_delete_entry() {
        let record = Record::new("bus", "ticket", -3);
        let entry = AuditEntry::delete(2, &record, 103);

        assert_eq!(entry.operation, Operation::Delete);
        assert_eq!(entry.position, Some(2));
        assert_eq!(entry.records, vec![record]);
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Add.to_string(), "ADD");
        assert_eq!(Operation::Reset.to_string(), "RESET");
    }

    #[test]
    fn test_serialization_skips_empty_fields() {
        let entry = AuditEntry::reset("line 2: expected 3 fields");
        let json = serde_json::to_string(&entry).unwrap();

        assert!(json.contains("\"operation\":\"reset\""));
        assert!(!json.contains("records"));
        assert!(!json.contains("balance"));

        let back: AuditEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
