//! Row outcome models.
//!
//! Every processed spreadsheet row ends in exactly one [`OutcomeCategory`];
//! the [`RowOutcome`] pairs it with a message for the run log.

use serde::{Deserialize, Serialize};

/// The category a processed row is counted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    /// At least one period was created.
    Migrated,
    /// Every generated period was already stored.
    AlreadyExisting,
    /// The row carried no positive days.
    NoDays,
    /// No employee matched the row's identifiers.
    NotFound,
    /// The row could not be migrated.
    Error,
}

impl std::fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeCategory::Migrated => write!(f, "migrated"),
            OutcomeCategory::AlreadyExisting => write!(f, "already existing"),
            OutcomeCategory::NoDays => write!(f, "no days"),
            OutcomeCategory::NotFound => write!(f, "not found"),
            OutcomeCategory::Error => write!(f, "error"),
        }
    }
}

/// The result of processing one spreadsheet row.
///
/// # Example
///
/// ```
/// use vacation_migration::models::{OutcomeCategory, RowOutcome};
///
/// let outcome = RowOutcome::new(4, OutcomeCategory::NotFound, "employee 3940 not found");
/// assert!(!outcome.is_success());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowOutcome {
    /// Spreadsheet row number (1-based, header is row 1).
    pub row: usize,
    /// The outcome category.
    pub category: OutcomeCategory,
    /// Human-readable detail.
    pub message: String,
    /// Periods written for this row.
    #[serde(default)]
    pub periods_created: usize,
    /// Generated periods that were already stored.
    #[serde(default)]
    pub periods_existing: usize,
}

impl RowOutcome {
    /// Creates an outcome with no periods written.
    pub fn new(row: usize, category: OutcomeCategory, message: impl Into<String>) -> Self {
        Self {
            row,
            category,
            message: message.into(),
            periods_created: 0,
            periods_existing: 0,
        }
    }

    /// Creates a migrated outcome.
    pub fn migrated(row: usize, periods_created: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            category: OutcomeCategory::Migrated,
            message: message.into(),
            periods_created,
            periods_existing: 0,
        }
    }

    /// Creates an outcome for a row whose periods were all stored already.
    pub fn already_existing(row: usize, periods_existing: usize) -> Self {
        Self {
            row,
            category: OutcomeCategory::AlreadyExisting,
            message: format!("All {} period(s) already exist", periods_existing),
            periods_created: 0,
            periods_existing,
        }
    }

    /// Returns true when the row was migrated.
    pub fn is_success(&self) -> bool {
        self.category == OutcomeCategory::Migrated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrated_outcome_is_success() {
        let outcome = RowOutcome::migrated(2, 3, "45 days");
        assert!(outcome.is_success());
        assert_eq!(outcome.periods_created, 3);
    }

    #[test]
    fn test_already_existing_outcome_counts_periods() {
        let outcome = RowOutcome::already_existing(5, 2);
        assert_eq!(outcome.category, OutcomeCategory::AlreadyExisting);
        assert_eq!(outcome.periods_existing, 2);
        assert_eq!(outcome.message, "All 2 period(s) already exist");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(OutcomeCategory::AlreadyExisting.to_string(), "already existing");
        assert_eq!(OutcomeCategory::NoDays.to_string(), "no days");
    }
}
