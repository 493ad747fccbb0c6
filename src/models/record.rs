//! Record model
//!
//! A record is one ledger entry: a category, a single-token description and
//! a signed amount. Positive amounts are income, negative amounts expenses.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single income or expense entry
///
/// Records are immutable once created; the ledger adds and removes them
/// whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    category: String,
    description: String,
    amount: i64,
}

impl Record {
    /// Create a new record
    pub fn new(category: impl Into<String>, description: impl Into<String>, amount: i64) -> Self {
        Self {
            category: category.into(),
            description: description.into(),
            amount,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }
}

impl fmt::Display for Record {
    /// Formats as the persisted line: `category description amount`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category, self.description, self.amount)
    }
}

/// Split text into exactly three whitespace-separated fields
///
/// Returns `None` for any other field count.
pub fn split_fields(text: &str) -> Option<(&str, &str, &str)> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(category), Some(description), Some(amount), None) => {
            Some((category, description, amount))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record() {
        let record = Record::new("meal", "lunch", -20);
        assert_eq!(record.category(), "meal");
        assert_eq!(record.description(), "lunch");
        assert_eq!(record.amount(), -20);
    }

    #[test]
    fn test_display_matches_line_format() {
        let record = Record::new("salary", "job", 1000);
        assert_eq!(record.to_string(), "salary job 1000");
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("meal lunch -20"), Some(("meal", "lunch", "-20")));
        assert_eq!(split_fields("  meal\tlunch   -20 "), Some(("meal", "lunch", "-20")));
        assert_eq!(split_fields("meal -20"), None);
        assert_eq!(split_fields("meal big lunch -20"), None);
        assert_eq!(split_fields(""), None);
    }
}
