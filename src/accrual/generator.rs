//! Historical vacation period generation.
//!
//! Given a hire date and the day balances read from the spreadsheet, this
//! module reconstructs the accrual periods those balances belong to. It walks
//! backward one anniversary year at a time from the newest credited year,
//! placing pending days into years still inside their validity window and
//! expired days into years past it, at most `max_days_per_period` of either
//! kind per year.
//!
//! Generation is pure: no database access happens here. The caller decides
//! whether each descriptor is persisted.

use chrono::{Datelike, NaiveDate};

use crate::config::AccrualRules;
use crate::error::{MigrationError, MigrationResult};
use crate::models::{
    BalanceInput, Eligibility, Employee, GenerationStep, PeriodDescriptor, PeriodKind,
    PeriodPlan, StepDecision,
};

use super::adjustment::negative_balance_adjustment;
use super::dates::anniversary_in;
use super::maturity::first_acquisition_year;

/// Generates the vacation periods accounting for an employee's balances.
///
/// # Arguments
///
/// * `hire_date` - The employee's hire date
/// * `balance` - Pending (possibly negative) and expired days
/// * `today` - The migration date
/// * `rules` - Cap per period, expiry window and early credit
///
/// # Returns
///
/// A [`PeriodPlan`] with the periods newest first and one trace step per
/// examined year.
///
/// - A negative pending balance yields exactly one adjustment period for the
///   current anniversary year; the expired quantity is not used.
/// - Otherwise each examined year with acquisition date `A` covers
///   `[max(A - 1 year, hire), A - 1 day]`. It is expired-eligible when
///   `today` is past `A + expiry_years`, balance-eligible otherwise. A year
///   that can take nothing is skipped but still consumed.
/// - Generation stops when both quantities are placed, when the year drops
///   below the hire year, or when a year's work period is empty. Whatever
///   could not be placed is reported as undistributed.
///
/// # Errors
///
/// - [`MigrationError::HireDateInFuture`] when `hire_date > today`
/// - [`MigrationError::NoPositiveDays`] when neither quantity is positive
/// - [`MigrationError::DateConstruction`] when a target year's dates cannot
///   be built; nothing is returned for the employee in that case
/// - [`MigrationError::NoEligiblePeriods`] when positive quantities were
///   given but no year could take any of them
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::generate_periods;
/// use vacation_migration::config::AccrualRules;
/// use vacation_migration::models::BalanceInput;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 5, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// let plan = generate_periods(hire, BalanceInput::new(45, 10), today, &AccrualRules::default())
///     .unwrap();
///
/// assert_eq!(plan.periods.len(), 3);
/// assert_eq!(plan.total_balance(), 45);
/// assert_eq!(plan.total_expired(), 10);
/// assert_eq!(plan.periods[0].start_date, NaiveDate::from_ymd_opt(2023, 5, 15).unwrap());
/// assert_eq!(plan.periods[0].end_date, NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
/// ```
pub fn generate_periods(
    hire_date: NaiveDate,
    balance: BalanceInput,
    today: NaiveDate,
    rules: &AccrualRules,
) -> MigrationResult<PeriodPlan> {
    if hire_date > today {
        return Err(MigrationError::HireDateInFuture { hire_date, today });
    }

    if balance.is_adjustment() {
        return adjustment_plan(hire_date, balance, today);
    }

    if !balance.has_positive_days() {
        return Err(MigrationError::NoPositiveDays);
    }

    let cap = i64::from(rules.max_days_per_period);
    let expiry_offset = i32::try_from(rules.expiry_years).unwrap_or(i32::MAX);

    let mut remaining_balance = balance.pending;
    let mut remaining_expired = i64::from(balance.expired);
    let mut year = first_acquisition_year(hire_date, today, rules)?;
    let mut plan = PeriodPlan::default();

    while (remaining_balance > 0 || remaining_expired > 0) && year >= hire_date.year() {
        let acquisition_date = anniversary_in(hire_date, year)?;
        let work_start = anniversary_in(hire_date, year - 1)?.max(hire_date);

        if acquisition_date <= work_start {
            plan.steps.push(GenerationStep {
                year,
                acquisition_date,
                work_start,
                eligibility: None,
                balance_taken: 0,
                expired_taken: 0,
                decision: StepDecision::Degenerate,
                reasoning: format!(
                    "Work period {} to {} is empty; generation stops",
                    work_start, acquisition_date
                ),
            });
            break;
        }

        let expires_on = anniversary_in(hire_date, year.saturating_add(expiry_offset))?;
        let eligibility = if today > expires_on {
            Eligibility::Expired
        } else {
            Eligibility::Balance
        };

        let (balance_taken, expired_taken) = match eligibility {
            Eligibility::Expired if remaining_expired > 0 => (0, remaining_expired.min(cap)),
            Eligibility::Balance if remaining_balance > 0 => (remaining_balance.min(cap), 0),
            _ => (0, 0),
        };

        if balance_taken == 0 && expired_taken == 0 {
            plan.steps.push(GenerationStep {
                year,
                acquisition_date,
                work_start,
                eligibility: Some(eligibility),
                balance_taken,
                expired_taken,
                decision: StepDecision::Skipped,
                reasoning: format!(
                    "Acquired {}, {}; no days of that kind remain",
                    acquisition_date,
                    describe_window(eligibility, expires_on)
                ),
            });
        } else {
            let end_date = day_before(acquisition_date)?;
            remaining_balance -= balance_taken;
            remaining_expired -= expired_taken;

            plan.periods.push(PeriodDescriptor {
                kind: PeriodKind::Regular,
                start_date: work_start,
                end_date,
                assigned: balance_taken + expired_taken,
                balance: balance_taken,
                expired: expired_taken,
            });
            plan.steps.push(GenerationStep {
                year,
                acquisition_date,
                work_start,
                eligibility: Some(eligibility),
                balance_taken,
                expired_taken,
                decision: StepDecision::Emitted,
                reasoning: format!(
                    "Acquired {}, {}: {} pending and {} expired days placed",
                    acquisition_date,
                    describe_window(eligibility, expires_on),
                    balance_taken,
                    expired_taken
                ),
            });
        }

        year -= 1;
    }

    if plan.periods.is_empty() {
        return Err(MigrationError::NoEligiblePeriods {
            pending: balance.pending,
            expired: balance.expired,
        });
    }

    plan.undistributed_balance = remaining_balance;
    plan.undistributed_expired = remaining_expired;
    Ok(plan)
}

/// Resolves the employee's hire date and generates their periods.
///
/// # Errors
///
/// Everything [`generate_periods`] returns, plus
/// [`MigrationError::MissingHireDate`] and [`MigrationError::InvalidHireDate`]
/// when the stored hire date is absent or unreadable.
pub fn plan_for_employee(
    employee: &Employee,
    balance: BalanceInput,
    today: NaiveDate,
    rules: &AccrualRules,
) -> MigrationResult<PeriodPlan> {
    let hire_date = employee.resolved_hire_date()?;
    generate_periods(hire_date, balance, today, rules)
}

fn adjustment_plan(
    hire_date: NaiveDate,
    balance: BalanceInput,
    today: NaiveDate,
) -> MigrationResult<PeriodPlan> {
    let period = negative_balance_adjustment(hire_date, balance.pending, today)?;
    let closing_anniversary = period.end_date.succ_opt().unwrap_or(period.end_date);

    let step = GenerationStep {
        year: closing_anniversary.year(),
        acquisition_date: closing_anniversary,
        work_start: period.start_date,
        eligibility: None,
        balance_taken: balance.pending,
        expired_taken: 0,
        decision: StepDecision::Adjustment,
        reasoning: format!(
            "Negative balance of {} days recorded as an adjustment; {} expired days not applied",
            balance.pending, balance.expired
        ),
    };

    Ok(PeriodPlan {
        periods: vec![period],
        steps: vec![step],
        undistributed_balance: 0,
        undistributed_expired: 0,
    })
}

fn day_before(date: NaiveDate) -> MigrationResult<NaiveDate> {
    date.pred_opt().ok_or(MigrationError::DateConstruction {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    })
}

fn describe_window(eligibility: Eligibility, expires_on: NaiveDate) -> String {
    match eligibility {
        Eligibility::Balance => format!("valid until {}", expires_on),
        Eligibility::Expired => format!("expired on {}", expires_on),
    }
}
