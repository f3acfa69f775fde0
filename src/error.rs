//! Error types for the vacation migration.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while loading configuration, reading the
//! spreadsheet, generating accrual periods or writing to the record store.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the vacation migration.
///
/// Run-level operations (configuration, spreadsheet, transaction handling)
/// return this error directly. Per-employee failures are also expressed with
/// it, but the migration driver converts them into a row outcome instead of
/// aborting the run.
///
/// # Example
///
/// ```
/// use vacation_migration::error::MigrationError;
///
/// let error = MigrationError::ConfigNotFound {
///     path: "/missing/migration.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/migration.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the migration cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        message: String,
    },

    /// The spreadsheet could not be opened or read.
    #[error("Failed to read spreadsheet '{path}': {message}")]
    SpreadsheetRead {
        /// The spreadsheet path.
        path: String,
        /// A description of the read error.
        message: String,
    },

    /// Required columns are absent from the spreadsheet header.
    #[error("Missing columns in spreadsheet: {}", columns.join(", "))]
    MissingColumns {
        /// Every configured column that was not found.
        columns: Vec<String>,
    },

    /// The employee has no hire date on record.
    #[error("Employee '{employee}' has no hire date")]
    MissingHireDate {
        /// Identifier of the employee, for reporting.
        employee: String,
    },

    /// The employee's hire date could not be interpreted.
    #[error("Employee '{employee}' has an invalid hire date: {value}")]
    InvalidHireDate {
        /// Identifier of the employee, for reporting.
        employee: String,
        /// The raw value as stored.
        value: String,
    },

    /// The hire date lies after the migration date.
    #[error("Hire date {hire_date} is after the migration date {today}")]
    HireDateInFuture {
        /// The hire date.
        hire_date: NaiveDate,
        /// The migration date.
        today: NaiveDate,
    },

    /// Neither pending nor expired days are positive.
    #[error("No positive days to migrate")]
    NoPositiveDays,

    /// A calendar date could not be built for a target year.
    #[error("Cannot build date {year:04}-{month:02}-{day:02}")]
    DateConstruction {
        /// Target year.
        year: i32,
        /// Target month.
        month: u32,
        /// Target day.
        day: u32,
    },

    /// Positive quantities were given but no accrual year could take them.
    #[error("No eligible accrual period for {pending} pending and {expired} expired days")]
    NoEligiblePeriods {
        /// Pending days requested.
        pending: i64,
        /// Expired days requested.
        expired: u32,
    },

    /// The record store reported an error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// A type alias for Results that return MigrationError.
pub type MigrationResult<T> = Result<T, MigrationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = MigrationError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = MigrationError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_missing_columns_lists_every_column() {
        let error = MigrationError::MissingColumns {
            columns: vec!["No. D mplado".to_string(), "DIAS VENCIDOS".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing columns in spreadsheet: No. D mplado, DIAS VENCIDOS"
        );
    }

    #[test]
    fn test_date_construction_pads_components() {
        let error = MigrationError::DateConstruction {
            year: 999,
            month: 2,
            day: 9,
        };
        assert_eq!(error.to_string(), "Cannot build date 0999-02-09");
    }

    #[test]
    fn test_hire_date_in_future_displays_both_dates() {
        let error = MigrationError::HireDateInFuture {
            hire_date: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            today: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Hire date 2030-01-01 is after the migration date 2024-06-01"
        );
    }

    #[test]
    fn test_invalid_hire_date_displays_employee_and_value() {
        let error = MigrationError::InvalidHireDate {
            employee: "3940".to_string(),
            value: "sin fecha".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee '3940' has an invalid hire date: sin fecha"
        );
    }

    #[test]
    fn test_database_error_converts_with_question_mark() {
        fn fails() -> MigrationResult<()> {
            Err(rusqlite::Error::QueryReturnedNoRows)?;
            Ok(())
        }

        match fails() {
            Err(MigrationError::Database(_)) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<MigrationError>();
    }
}
