//! Run summary.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{OutcomeCategory, RowOutcome};

/// Counters accumulated over one migration run.
///
/// # Example
///
/// ```
/// use vacation_migration::migration::MigrationSummary;
/// use vacation_migration::models::{OutcomeCategory, RowOutcome};
/// use uuid::Uuid;
///
/// let mut summary = MigrationSummary::new(Uuid::new_v4(), 3, 2);
/// summary.record(RowOutcome::migrated(2, 2, "45 balance and 0 expired days"));
/// summary.record(RowOutcome::new(3, OutcomeCategory::NotFound, "no match"));
///
/// assert_eq!(summary.migrated, 1);
/// assert_eq!(summary.not_found, 1);
/// assert_eq!(summary.periods_created, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    /// Identifier of the run.
    pub run_id: Uuid,
    /// Data rows present in the sheet.
    pub rows_read: usize,
    /// Rows carrying an identifier and a pending days value.
    pub valid_rows: usize,
    /// Rows with at least one period created.
    pub migrated: usize,
    /// Rows whose periods were all stored already.
    pub already_existing: usize,
    /// Rows with no positive days.
    pub no_days: usize,
    /// Rows whose employee could not be found.
    pub not_found: usize,
    /// Rows that failed.
    pub errors: usize,
    /// Periods inserted.
    pub periods_created: usize,
    /// Generated periods left alone because they were already stored.
    pub periods_skipped: usize,
    /// Periods deleted by a reset before processing.
    pub periods_cleared: usize,
    /// Whether the run transaction was committed.
    pub committed: bool,
    /// Every row outcome, in sheet order.
    pub outcomes: Vec<RowOutcome>,
}

impl MigrationSummary {
    /// Creates an empty summary.
    pub fn new(run_id: Uuid, rows_read: usize, valid_rows: usize) -> Self {
        Self {
            run_id,
            rows_read,
            valid_rows,
            migrated: 0,
            already_existing: 0,
            no_days: 0,
            not_found: 0,
            errors: 0,
            periods_created: 0,
            periods_skipped: 0,
            periods_cleared: 0,
            committed: false,
            outcomes: Vec::new(),
        }
    }

    /// Counts a row outcome and keeps it.
    pub fn record(&mut self, outcome: RowOutcome) {
        match outcome.category {
            OutcomeCategory::Migrated => self.migrated += 1,
            OutcomeCategory::AlreadyExisting => self.already_existing += 1,
            OutcomeCategory::NoDays => self.no_days += 1,
            OutcomeCategory::NotFound => self.not_found += 1,
            OutcomeCategory::Error => self.errors += 1,
        }
        self.periods_created += outcome.periods_created;
        self.periods_skipped += outcome.periods_existing;
        self.outcomes.push(outcome);
    }

    /// Number of rows counted so far.
    pub fn processed(&self) -> usize {
        self.migrated + self.already_existing + self.no_days + self.not_found + self.errors
    }

    /// Outcomes of a single category.
    pub fn outcomes_in(&self, category: OutcomeCategory) -> impl Iterator<Item = &RowOutcome> {
        self.outcomes.iter().filter(move |o| o.category == category)
    }
}

impl std::fmt::Display for MigrationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Vacation migration summary (run {})", self.run_id)?;
        writeln!(f, "  Rows read:         {}", self.rows_read)?;
        writeln!(f, "  Valid rows:        {}", self.valid_rows)?;
        writeln!(f, "  Migrated:          {}", self.migrated)?;
        writeln!(f, "  Already existing:  {}", self.already_existing)?;
        writeln!(f, "  No days:           {}", self.no_days)?;
        writeln!(f, "  Not found:         {}", self.not_found)?;
        writeln!(f, "  Errors:            {}", self.errors)?;
        writeln!(f, "  Periods created:   {}", self.periods_created)?;
        if self.periods_skipped > 0 {
            writeln!(f, "  Periods skipped:   {}", self.periods_skipped)?;
        }
        if self.periods_cleared > 0 {
            writeln!(f, "  Periods cleared:   {}", self.periods_cleared)?;
        }
        write!(
            f,
            "  Transaction:       {}",
            if self.committed { "committed" } else { "rolled back" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with(categories: &[OutcomeCategory]) -> MigrationSummary {
        let mut summary = MigrationSummary::new(Uuid::nil(), categories.len(), categories.len());
        for (i, category) in categories.iter().enumerate() {
            summary.record(RowOutcome::new(i + 2, *category, "detail"));
        }
        summary
    }

    #[test]
    fn test_every_category_is_counted() {
        let summary = summary_with(&[
            OutcomeCategory::Migrated,
            OutcomeCategory::AlreadyExisting,
            OutcomeCategory::NoDays,
            OutcomeCategory::NotFound,
            OutcomeCategory::Error,
            OutcomeCategory::Error,
        ]);

        assert_eq!(summary.migrated, 1);
        assert_eq!(summary.already_existing, 1);
        assert_eq!(summary.no_days, 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.processed(), 6);
        assert_eq!(summary.outcomes_in(OutcomeCategory::Error).count(), 2);
    }

    #[test]
    fn test_report_lists_counts_and_transaction_state() {
        let mut summary = summary_with(&[OutcomeCategory::NotFound]);
        let report = summary.to_string();
        assert!(report.starts_with(
            "Vacation migration summary (run 00000000-0000-0000-0000-000000000000)"
        ));
        assert!(report.contains("  Not found:         1"));
        assert!(report.ends_with("rolled back"));
        assert!(!report.contains("Periods skipped"));

        summary.committed = true;
        summary.periods_skipped = 4;
        let report = summary.to_string();
        assert!(report.contains("  Periods skipped:   4"));
        assert!(report.ends_with("committed"));
    }
}
