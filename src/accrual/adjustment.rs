//! Negative balance adjustments.
//!
//! A negative pending balance is not spread over past years. It becomes a
//! single adjustment period covering the anniversary year that contains the
//! migration date.

use chrono::{Datelike, NaiveDate};

use crate::error::{MigrationError, MigrationResult};
use crate::models::{PeriodDescriptor, PeriodKind};

use super::dates::{anniversary_in, anniversary_on_or_before};

/// Builds the adjustment period for a negative pending balance.
///
/// The period runs from the latest anniversary on or before `today` (or the
/// hire date, if later) to the day before the next anniversary. It carries
/// `assigned = 0`, `balance = pending` and `expired = 0`.
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::negative_balance_adjustment;
/// use vacation_migration::models::PeriodKind;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 5, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// let period = negative_balance_adjustment(hire, -4, today).unwrap();
/// assert_eq!(period.kind, PeriodKind::Adjustment);
/// assert_eq!(period.start_date, NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());
/// assert_eq!(period.end_date, NaiveDate::from_ymd_opt(2025, 5, 14).unwrap());
/// assert_eq!(period.balance, -4);
/// ```
pub fn negative_balance_adjustment(
    hire_date: NaiveDate,
    pending: i64,
    today: NaiveDate,
) -> MigrationResult<PeriodDescriptor> {
    let anniversary = anniversary_on_or_before(hire_date, today)?;
    let next_anniversary = anniversary_in(hire_date, anniversary.year() + 1)?;
    let end_date = next_anniversary
        .pred_opt()
        .ok_or(MigrationError::DateConstruction {
            year: next_anniversary.year(),
            month: next_anniversary.month(),
            day: next_anniversary.day(),
        })?;

    Ok(PeriodDescriptor {
        kind: PeriodKind::Adjustment,
        start_date: anniversary.max(hire_date),
        end_date,
        assigned: 0,
        balance: pending,
        expired: 0,
    })
}
