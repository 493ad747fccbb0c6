//! Audit history display formatting

use crate::audit::AuditEntry;

/// Format one audit entry as a single line
pub fn format_audit_entry(entry: &AuditEntry) -> String {
    let mut line = format!(
        "{} {:<6}",
        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
        entry.operation.to_string()
    );

    if let Some(position) = entry.position {
        line.push_str(&format!(" #{}", position));
    }

    let records: Vec<String> = entry.records.iter().map(|r| r.to_string()).collect();
    if !records.is_empty() {
        line.push_str(&format!(" {}", records.join(", ")));
    }

    if let Some(detail) = &entry.detail {
        line.push_str(&format!(" ({})", detail));
    }

    if let Some(balance) = entry.balance {
        line.push_str(&format!(" -> balance {}", balance));
    }

    line
}

/// Format a list of audit entries, oldest first
pub fn format_history(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No history recorded.\n".to_string();
    }

    let mut output = String::new();
    for entry in entries {
        output.push_str(&format_audit_entry(entry));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    #[test]
    fn test_add_line() {
        let records = vec![
            Record::new("meal", "lunch", -20),
            Record::new("salary", "job", 1000),
        ];
        let line = format_audit_entry(&AuditEntry::add(&records, 980));

        assert!(line.contains("ADD"));
        assert!(line.ends_with("meal lunch -20, salary job 1000 -> balance 980"));
    }

    #[test]
    fn test_delete_line() {
        let record = Record::new("bus", "ticket", -3);
        let line = format_audit_entry(&AuditEntry::delete(2, &record, 103));
        assert!(line.ends_with("#2 bus ticket -3 -> balance 103"));
    }

    #[test]
    fn test_reset_and_save_lines() {
        let reset = format_audit_entry(&AuditEntry::reset("line 2: bad"));
        assert!(reset.ends_with("(line 2: bad)"));

        let save = format_audit_entry(&AuditEntry::save(50, 3));
        assert!(save.ends_with("(3 records) -> balance 50"));
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(format_history(&[]), "No history recorded.\n");
    }
}
