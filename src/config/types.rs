//! Configuration types for the vacation migration.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use serde::Deserialize;
use std::path::PathBuf;

/// Creator tag written on every migrated row when none is configured.
pub const DEFAULT_CREATED_BY: &str = "MIGRACION_VACACIONES";

/// Spreadsheet column names for the fields the migration reads.
///
/// Names are matched after trimming and collapsing internal whitespace on
/// both sides. At least one identifier column must be configured.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ColumnMapping {
    /// Column holding the employee number (e.g. "No. D mplado").
    #[serde(default)]
    pub employee_number: Option<String>,
    /// Column holding the national id.
    #[serde(default)]
    pub national_id: Option<String>,
    /// Column holding the pending days.
    pub days_pending: String,
    /// Column holding the expired days. Absent means zero for every row.
    #[serde(default)]
    pub days_expired: Option<String>,
}

impl ColumnMapping {
    /// Returns every configured column name, in a stable order.
    pub fn configured(&self) -> Vec<&str> {
        [
            self.employee_number.as_deref(),
            self.national_id.as_deref(),
            Some(self.days_pending.as_str()),
            self.days_expired.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Spreadsheet input settings.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Path to the spreadsheet file.
    pub path: PathBuf,
    /// Sheet to read. The first sheet is used when absent.
    #[serde(default)]
    pub sheet: Option<String>,
    /// Column mapping.
    pub columns: ColumnMapping,
}

/// Record store settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    pub path: PathBuf,
}

/// What to do with periods stored by an earlier run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingPeriodPolicy {
    /// Check each period before inserting and keep the stored one.
    #[default]
    Skip,
    /// Delete every stored period before processing.
    Reset,
}

/// Run-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Creator tag for the audit columns.
    #[serde(default = "default_created_by")]
    pub created_by: String,
    /// Policy for periods already stored.
    #[serde(default)]
    pub existing_periods: ExistingPeriodPolicy,
}

fn default_created_by() -> String {
    DEFAULT_CREATED_BY.to_string()
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            created_by: default_created_by(),
            existing_periods: ExistingPeriodPolicy::default(),
        }
    }
}

/// The rules governing how day balances map onto accrual years.
///
/// # Example
///
/// ```
/// use vacation_migration::config::AccrualRules;
///
/// let rules = AccrualRules::default();
/// assert_eq!(rules.max_days_per_period, 30);
/// assert_eq!(rules.expiry_years, 3);
/// assert_eq!(rules.early_credit_months, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AccrualRules {
    /// Most days of either kind one period may carry.
    pub max_days_per_period: u32,
    /// Years after the acquisition date before unused days expire.
    pub expiry_years: u32,
    /// Months before the anniversary at which the current period is credited.
    pub early_credit_months: u32,
}

impl Default for AccrualRules {
    fn default() -> Self {
        Self {
            max_days_per_period: 30,
            expiry_years: 3,
            early_credit_months: 1,
        }
    }
}

/// The complete migration configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationConfig {
    /// Spreadsheet input.
    pub input: InputConfig,
    /// Record store.
    pub database: DatabaseConfig,
    /// Run-wide settings.
    #[serde(default)]
    pub run: RunConfig,
    /// Accrual rules.
    #[serde(default)]
    pub accrual: AccrualRules,
}
