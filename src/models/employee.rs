//! Employee model and related types.
//!
//! This module defines the [`Employee`] record read from the HR database and
//! the [`RawDate`] type used to carry hire dates in whatever shape the source
//! table stored them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::accrual::normalize_date;
use crate::error::{MigrationError, MigrationResult};

/// A date value as stored in the source database, before normalisation.
///
/// Legacy HR tables hold hire dates as ISO text, date-times, day-first text,
/// Spanish long-form text or spreadsheet serial numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    /// A textual date in any supported format.
    Text(String),
    /// A spreadsheet serial day number (days since 1899-12-30).
    Serial(f64),
}

impl std::fmt::Display for RawDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawDate::Text(text) => write!(f, "{}", text),
            RawDate::Serial(serial) => write!(f, "{}", serial),
        }
    }
}

/// Represents an employee whose vacation balance is being migrated.
///
/// Employees are only read by the migration, never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Internal identifier of the employee row.
    pub personal_id: i64,
    /// The employee number printed on HR documents, if assigned.
    pub employee_number: Option<i64>,
    /// The national identity document number.
    pub national_id: String,
    /// Display name.
    pub full_name: String,
    /// The hire date exactly as stored.
    pub hire_date: Option<RawDate>,
}

impl Employee {
    /// Returns the identifier used in logs and resolution numbers.
    ///
    /// The employee number is preferred; the internal id is used when the
    /// employee has no number.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_migration::models::Employee;
    ///
    /// let employee = Employee {
    ///     personal_id: 17,
    ///     employee_number: Some(3940),
    ///     national_id: "8-123-456".to_string(),
    ///     full_name: "Ana Pérez".to_string(),
    ///     hire_date: None,
    /// };
    /// assert_eq!(employee.reference(), "3940");
    /// ```
    pub fn reference(&self) -> String {
        match self.employee_number {
            Some(number) => number.to_string(),
            None => self.personal_id.to_string(),
        }
    }

    /// Resolves the stored hire date into a calendar date.
    ///
    /// # Errors
    ///
    /// - [`MigrationError::MissingHireDate`] when no hire date is stored.
    /// - [`MigrationError::InvalidHireDate`] when the stored value cannot be
    ///   interpreted as a date.
    ///
    /// # Examples
    ///
    /// ```
    /// use vacation_migration::models::{Employee, RawDate};
    /// use chrono::NaiveDate;
    ///
    /// let employee = Employee {
    ///     personal_id: 17,
    ///     employee_number: Some(3940),
    ///     national_id: "8-123-456".to_string(),
    ///     full_name: "Ana Pérez".to_string(),
    ///     hire_date: Some(RawDate::Text("15/05/2020".to_string())),
    /// };
    /// assert_eq!(
    ///     employee.resolved_hire_date().unwrap(),
    ///     NaiveDate::from_ymd_opt(2020, 5, 15).unwrap()
    /// );
    /// ```
    pub fn resolved_hire_date(&self) -> MigrationResult<NaiveDate> {
        let raw = self
            .hire_date
            .as_ref()
            .ok_or_else(|| MigrationError::MissingHireDate {
                employee: self.reference(),
            })?;

        normalize_date(raw).ok_or_else(|| MigrationError::InvalidHireDate {
            employee: self.reference(),
            value: raw.to_string(),
        })
    }
}
