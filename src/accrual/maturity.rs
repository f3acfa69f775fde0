//! Maturity gate for the current accrual period.
//!
//! The current period runs from the latest anniversary on or before today
//! to the next one. It is credited a little before it closes (one month by
//! default). Until then the newest year the generator may fill is the one
//! ending at the latest anniversary.

use chrono::{Datelike, Months, NaiveDate};

use crate::config::AccrualRules;
use crate::error::{MigrationError, MigrationResult};

use super::dates::{anniversary_in, anniversary_on_or_before};

/// Returns the anniversary that closes the period containing `today`.
fn next_anniversary(hire_date: NaiveDate, today: NaiveDate) -> MigrationResult<NaiveDate> {
    let latest = anniversary_on_or_before(hire_date, today)?;
    anniversary_in(hire_date, latest.year() + 1)
}

/// Returns true when the period containing `today` can already be credited.
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::current_period_matured;
/// use vacation_migration::config::AccrualRules;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 5, 15).unwrap();
/// let rules = AccrualRules::default();
///
/// // One month before the anniversary: credited early
/// let early = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
/// assert!(current_period_matured(hire, early, &rules).unwrap());
///
/// // One day earlier: not yet
/// let too_early = NaiveDate::from_ymd_opt(2024, 4, 14).unwrap();
/// assert!(!current_period_matured(hire, too_early, &rules).unwrap());
/// ```
pub fn current_period_matured(
    hire_date: NaiveDate,
    today: NaiveDate,
    rules: &AccrualRules,
) -> MigrationResult<bool> {
    let anniversary = next_anniversary(hire_date, today)?;
    let credited_from = anniversary
        .checked_sub_months(Months::new(rules.early_credit_months))
        .ok_or(MigrationError::DateConstruction {
            year: anniversary.year(),
            month: anniversary.month(),
            day: anniversary.day(),
        })?;

    Ok(today >= credited_from)
}

/// Returns the acquisition year the generator starts from.
///
/// This is the year of the anniversary closing the current period when that
/// period has matured, and the year before it otherwise. Near the turn of
/// the year the first case can be `today.year() + 1`.
pub fn first_acquisition_year(
    hire_date: NaiveDate,
    today: NaiveDate,
    rules: &AccrualRules,
) -> MigrationResult<i32> {
    let closing_year = next_anniversary(hire_date, today)?.year();
    if current_period_matured(hire_date, today, rules)? {
        Ok(closing_year)
    } else {
        Ok(closing_year - 1)
    }
}
