//! Vacation period models.
//!
//! This module contains the [`PeriodDescriptor`] produced by the period
//! generator and the [`VacationPeriod`] row persisted in the record store,
//! together with the [`AuditContext`] that fills the audit columns.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Employee;

/// The kind of a vacation period row.
///
/// The numeric codes are the values stored in the `kind` column.
///
/// # Example
///
/// ```
/// use vacation_migration::models::PeriodKind;
///
/// assert_eq!(PeriodKind::Regular.code(), 1);
/// assert_eq!(PeriodKind::from_code(2), Some(PeriodKind::Adjustment));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// A yearly accrual period carrying balance or expired days.
    Regular,
    /// A correction that records a negative balance.
    Adjustment,
}

impl PeriodKind {
    /// Returns the stored code for this kind.
    pub fn code(self) -> i64 {
        match self {
            PeriodKind::Regular => 1,
            PeriodKind::Adjustment => 2,
        }
    }

    /// Parses a stored code.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(PeriodKind::Regular),
            2 => Some(PeriodKind::Adjustment),
            _ => None,
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Regular => write!(f, "regular"),
            PeriodKind::Adjustment => write!(f, "adjustment"),
        }
    }
}

/// A period produced by the generator, before any audit data is attached.
///
/// Both dates are inclusive. `end_date` is the day before the anniversary
/// that closes the period.
///
/// # Example
///
/// ```
/// use vacation_migration::models::{PeriodDescriptor, PeriodKind};
/// use chrono::NaiveDate;
///
/// let period = PeriodDescriptor {
///     kind: PeriodKind::Regular,
///     start_date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
///     assigned: 30,
///     balance: 30,
///     expired: 0,
/// };
/// assert!(period.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDescriptor {
    /// The period kind.
    pub kind: PeriodKind,
    /// First day of the work period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the work period (inclusive).
    pub end_date: NaiveDate,
    /// Days assigned to this period (balance plus expired).
    pub assigned: i64,
    /// Days still usable. Negative for adjustments.
    pub balance: i64,
    /// Days forfeited.
    pub expired: i64,
}

impl PeriodDescriptor {
    /// Checks if a date falls within the period, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Checks if two periods share at least one day.
    pub fn overlaps(&self, other: &PeriodDescriptor) -> bool {
        self.start_date <= other.end_date && other.start_date <= self.end_date
    }
}

/// Audit values shared by every row written in one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    /// Creator tag written to `created_by`.
    pub created_by: String,
    /// Timestamp written to `created_at`.
    pub created_at: NaiveDateTime,
    /// Date of the run, used for effective and resolution dates.
    pub run_date: NaiveDate,
}

/// A vacation period row as stored in the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationPeriod {
    /// Row identifier, `None` until inserted.
    pub id: Option<i64>,
    /// National id of the owning employee.
    pub national_id: String,
    /// The period kind.
    pub kind: PeriodKind,
    /// First day of the work period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the work period (inclusive).
    pub end_date: NaiveDate,
    /// Days assigned to this period.
    pub assigned: i64,
    /// Days still usable.
    pub balance: i64,
    /// Days forfeited.
    pub expired: i64,
    /// Status flag, 1 for active.
    pub status: i64,
    /// Free-text description.
    pub description: String,
    /// Creator tag.
    pub created_by: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Date from which the balance is effective.
    pub effective_date: NaiveDate,
    /// Balance carried before this row was written.
    pub previous_balance: i64,
    /// Resolution number backing the row.
    pub resolution_number: String,
    /// Resolution date.
    pub resolution_date: NaiveDate,
}

/// Status flag for an active period.
pub const ACTIVE_STATUS: i64 = 1;

impl VacationPeriod {
    /// Builds the row to persist for a generated period.
    ///
    /// # Example
    ///
    /// ```
    /// use vacation_migration::models::{
    ///     AuditContext, Employee, PeriodDescriptor, PeriodKind, VacationPeriod,
    /// };
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     personal_id: 17,
    ///     employee_number: Some(3940),
    ///     national_id: "8-123-456".to_string(),
    ///     full_name: "Ana Pérez".to_string(),
    ///     hire_date: None,
    /// };
    /// let run_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// let audit = AuditContext {
    ///     created_by: "MIGRACION_VACACIONES".to_string(),
    ///     created_at: run_date.and_hms_opt(9, 0, 0).unwrap(),
    ///     run_date,
    /// };
    /// let descriptor = PeriodDescriptor {
    ///     kind: PeriodKind::Regular,
    ///     start_date: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
    ///     end_date: NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
    ///     assigned: 30,
    ///     balance: 30,
    ///     expired: 0,
    /// };
    ///
    /// let row = VacationPeriod::from_descriptor(&descriptor, &employee, &audit);
    /// assert_eq!(row.resolution_number, "MIG-3940-2023");
    /// ```
    pub fn from_descriptor(
        descriptor: &PeriodDescriptor,
        employee: &Employee,
        audit: &AuditContext,
    ) -> Self {
        let description = match descriptor.kind {
            PeriodKind::Regular => format!(
                "Historical balance migrated ({} balance, {} expired) - Period {}-{}",
                descriptor.balance,
                descriptor.expired,
                descriptor.start_date.year(),
                descriptor.end_date.year()
            ),
            PeriodKind::Adjustment => format!(
                "Negative balance adjustment ({} days) - Period {}-{}",
                descriptor.balance,
                descriptor.start_date.year(),
                descriptor.end_date.year()
            ),
        };

        Self {
            id: None,
            national_id: employee.national_id.clone(),
            kind: descriptor.kind,
            start_date: descriptor.start_date,
            end_date: descriptor.end_date,
            assigned: descriptor.assigned,
            balance: descriptor.balance,
            expired: descriptor.expired,
            status: ACTIVE_STATUS,
            description,
            created_by: audit.created_by.clone(),
            created_at: audit.created_at,
            effective_date: audit.run_date,
            previous_balance: 0,
            resolution_number: format!(
                "MIG-{}-{}",
                employee.reference(),
                descriptor.start_date.year()
            ),
            resolution_date: audit.run_date,
        }
    }
}
