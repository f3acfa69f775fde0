//! Per-row migration driver.
//!
//! The driver walks the extracted sheet rows inside one run-wide
//! transaction. Each row is cleaned, matched to an employee, planned by the
//! period generator and persisted inside its own savepoint, so a database
//! error only discards that employee's inserts. Every row ends in exactly one
//! [`RowOutcome`]; only failures of the run transaction itself are returned
//! as errors.

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, Transaction};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::accrual::plan_for_employee;
use crate::config::{AccrualRules, ExistingPeriodPolicy, MigrationConfig, RunConfig};
use crate::error::{MigrationError, MigrationResult};
use crate::models::{
    AuditContext, BalanceInput, Employee, OutcomeCategory, PeriodPlan, RowOutcome, VacationPeriod,
};
use crate::source::{
    BalanceRow, BalanceSheet, clean_employee_number, clean_national_id, parse_day_quantity,
};
use crate::store;

use super::summary::MigrationSummary;

/// Values fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunContext {
    /// Identifier attached to every log line of the run.
    pub run_id: Uuid,
    /// The migration date used by the generator.
    pub today: NaiveDate,
    /// Timestamp written to the audit columns.
    pub created_at: NaiveDateTime,
}

impl RunContext {
    /// Creates a context with a fresh run id.
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            today: now.date(),
            created_at: now,
        }
    }
}

/// Maps a per-employee error onto the category the row is counted under.
///
/// # Example
///
/// ```
/// use vacation_migration::error::MigrationError;
/// use vacation_migration::migration::classify_error;
/// use vacation_migration::models::OutcomeCategory;
///
/// assert_eq!(classify_error(&MigrationError::NoPositiveDays), OutcomeCategory::NoDays);
/// ```
pub fn classify_error(error: &MigrationError) -> OutcomeCategory {
    match error {
        MigrationError::NoPositiveDays => OutcomeCategory::NoDays,
        _ => OutcomeCategory::Error,
    }
}

/// Cleaned values of one sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedRow {
    employee_number: Option<i64>,
    national_id: Option<String>,
    balance: BalanceInput,
}

impl ParsedRow {
    fn describe(&self) -> String {
        match (self.employee_number, &self.national_id) {
            (Some(number), Some(national_id)) => {
                format!("employee number {} or national id {}", number, national_id)
            }
            (Some(number), None) => format!("employee number {}", number),
            (None, Some(national_id)) => format!("national id {}", national_id),
            (None, None) => "no identifier".to_string(),
        }
    }
}

fn parse_row(row: &BalanceRow) -> Result<ParsedRow, String> {
    let employee_number = clean_employee_number(&row.employee_number);
    let national_id = clean_national_id(&row.national_id);
    if employee_number.is_none() && national_id.is_none() {
        let raw = if row.employee_number.is_blank() {
            row.national_id.to_text()
        } else {
            row.employee_number.to_text()
        };
        return Err(format!("Invalid employee identifier '{}'", raw));
    }

    let pending = parse_day_quantity(&row.days_pending)
        .ok_or_else(|| format!("Invalid pending days '{}'", row.days_pending.to_text()))?;

    let expired = if row.days_expired.is_blank() {
        0
    } else {
        let days = parse_day_quantity(&row.days_expired)
            .ok_or_else(|| format!("Invalid expired days '{}'", row.days_expired.to_text()))?;
        if days < 0 {
            return Err(format!("Expired days cannot be negative: {}", days));
        }
        u32::try_from(days).map_err(|_| format!("Expired days out of range: {}", days))?
    };

    Ok(ParsedRow {
        employee_number,
        national_id,
        balance: BalanceInput::new(pending, expired),
    })
}

#[derive(Debug, Default, Clone, Copy)]
struct Persisted {
    created: usize,
    existing: usize,
}

/// Migrates vacation balances into the period table.
///
/// # Example
///
/// ```
/// use vacation_migration::config::{AccrualRules, RunConfig};
/// use vacation_migration::migration::{RunContext, VacationMigrator};
/// use vacation_migration::source::BalanceSheet;
/// use vacation_migration::store::ensure_schema;
/// use chrono::NaiveDate;
/// use rusqlite::Connection;
///
/// let mut conn = Connection::open_in_memory().unwrap();
/// ensure_schema(&conn).unwrap();
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let migrator = VacationMigrator::new(RunConfig::default(), AccrualRules::default(), RunContext::new(now));
///
/// let summary = migrator.run(&mut conn, &BalanceSheet::default()).unwrap();
/// assert_eq!(summary.processed(), 0);
/// assert!(!summary.committed);
/// ```
#[derive(Debug, Clone)]
pub struct VacationMigrator {
    run: RunConfig,
    rules: AccrualRules,
    context: RunContext,
    audit: AuditContext,
}

impl VacationMigrator {
    /// Creates a migrator for one run.
    pub fn new(run: RunConfig, rules: AccrualRules, context: RunContext) -> Self {
        let audit = AuditContext {
            created_by: run.created_by.clone(),
            created_at: context.created_at,
            run_date: context.today,
        };
        Self {
            run,
            rules,
            context,
            audit,
        }
    }

    /// Creates a migrator from the loaded configuration.
    pub fn from_config(config: &MigrationConfig, context: RunContext) -> Self {
        Self::new(config.run.clone(), config.accrual, context)
    }

    /// Returns the run context.
    pub fn context(&self) -> &RunContext {
        &self.context
    }

    /// Processes every row of the sheet in one transaction.
    ///
    /// With [`ExistingPeriodPolicy::Reset`] every stored period is deleted
    /// first, inside the same transaction. The transaction is committed only
    /// when at least one period was created; otherwise it is rolled back,
    /// reset included.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::Database`] when the transaction cannot be
    /// opened, the reset fails, or the final commit or rollback fails.
    /// Per-row failures are reported in the summary instead.
    pub fn run(
        &self,
        conn: &mut Connection,
        sheet: &BalanceSheet,
    ) -> MigrationResult<MigrationSummary> {
        let run_id = self.context.run_id;
        info!(
            run_id = %run_id,
            rows_read = sheet.total_rows,
            valid_rows = sheet.rows.len(),
            today = %self.context.today,
            policy = ?self.run.existing_periods,
            "Starting vacation migration"
        );

        let mut summary = MigrationSummary::new(run_id, sheet.total_rows, sheet.rows.len());
        let mut tx = conn.transaction()?;

        if self.run.existing_periods == ExistingPeriodPolicy::Reset {
            summary.periods_cleared = store::clear_periods(&tx)?;
            info!(
                run_id = %run_id,
                removed = summary.periods_cleared,
                "Cleared stored vacation periods"
            );
        }

        for row in &sheet.rows {
            let outcome = self.migrate_row(&mut tx, row);
            self.log_outcome(&outcome);
            summary.record(outcome);
        }

        if summary.periods_created > 0 {
            tx.commit()?;
            summary.committed = true;
            info!(
                run_id = %run_id,
                migrated = summary.migrated,
                periods = summary.periods_created,
                "Migration committed"
            );
        } else {
            tx.rollback()?;
            warn!(run_id = %run_id, "No periods created; transaction rolled back");
        }

        Ok(summary)
    }

    fn migrate_row(&self, tx: &mut Transaction<'_>, row: &BalanceRow) -> RowOutcome {
        let row_number = row.row_number;

        let parsed = match parse_row(row) {
            Ok(parsed) => parsed,
            Err(message) => return RowOutcome::new(row_number, OutcomeCategory::Error, message),
        };

        if !parsed.balance.is_adjustment() && !parsed.balance.has_positive_days() {
            return RowOutcome::new(
                row_number,
                OutcomeCategory::NoDays,
                MigrationError::NoPositiveDays.to_string(),
            );
        }

        let employee = match store::find_employee(
            tx,
            parsed.employee_number,
            parsed.national_id.as_deref(),
        ) {
            Ok(Some(employee)) => employee,
            Ok(None) => {
                return RowOutcome::new(
                    row_number,
                    OutcomeCategory::NotFound,
                    format!("No employee found for {}", parsed.describe()),
                );
            }
            Err(err) => return RowOutcome::new(row_number, OutcomeCategory::Error, err.to_string()),
        };

        if parsed.balance.is_adjustment() && parsed.balance.expired > 0 {
            info!(
                run_id = %self.context.run_id,
                row = row_number,
                employee = %employee.reference(),
                expired = parsed.balance.expired,
                "Expired days not applied to a negative balance adjustment"
            );
        }

        let plan = match plan_for_employee(&employee, parsed.balance, self.context.today, &self.rules)
        {
            Ok(plan) => plan,
            Err(err) => return RowOutcome::new(row_number, classify_error(&err), err.to_string()),
        };
        self.trace_plan(row_number, &employee, &plan);

        let periods: Vec<VacationPeriod> = plan
            .periods
            .iter()
            .map(|descriptor| VacationPeriod::from_descriptor(descriptor, &employee, &self.audit))
            .collect();

        match self.persist(tx, &periods) {
            Ok(Persisted {
                created: 0,
                existing,
            }) => RowOutcome::already_existing(row_number, existing),
            Ok(Persisted { created, existing }) => {
                let mut message = plan.summary();
                if existing > 0 {
                    message.push_str(&format!("; {} period(s) already existed", existing));
                }
                RowOutcome {
                    periods_existing: existing,
                    ..RowOutcome::migrated(row_number, created, message)
                }
            }
            Err(err) => RowOutcome::new(
                row_number,
                OutcomeCategory::Error,
                format!("Inserts rolled back: {}", err),
            ),
        }
    }

    fn persist(
        &self,
        tx: &mut Transaction<'_>,
        periods: &[VacationPeriod],
    ) -> MigrationResult<Persisted> {
        // Dropping the savepoint on an early return rolls it back.
        let savepoint = tx.savepoint()?;
        let mut persisted = Persisted::default();

        for period in periods {
            if self.run.existing_periods == ExistingPeriodPolicy::Skip
                && store::period_exists(&savepoint, period)?
            {
                persisted.existing += 1;
                continue;
            }
            store::insert_period(&savepoint, period)?;
            persisted.created += 1;
        }

        savepoint.commit()?;
        Ok(persisted)
    }

    fn trace_plan(&self, row: usize, employee: &Employee, plan: &PeriodPlan) {
        match serde_json::to_string(&plan.steps) {
            Ok(steps) => debug!(
                run_id = %self.context.run_id,
                row,
                employee = %employee.reference(),
                steps = %steps,
                "Generation trace"
            ),
            Err(err) => debug!(
                run_id = %self.context.run_id,
                row,
                error = %err,
                "Generation trace could not be serialised"
            ),
        }

        if !plan.is_fully_distributed() {
            warn!(
                run_id = %self.context.run_id,
                row,
                employee = %employee.reference(),
                national_id = %employee.national_id,
                undistributed_balance = plan.undistributed_balance,
                undistributed_expired = plan.undistributed_expired,
                "Not enough eligible years since hire to place every day"
            );
        }
    }

    fn log_outcome(&self, outcome: &RowOutcome) {
        let run_id = self.context.run_id;
        match outcome.category {
            OutcomeCategory::Migrated => info!(
                run_id = %run_id,
                row = outcome.row,
                periods = outcome.periods_created,
                message = %outcome.message,
                "Row migrated"
            ),
            OutcomeCategory::AlreadyExisting | OutcomeCategory::NoDays => info!(
                run_id = %run_id,
                row = outcome.row,
                category = %outcome.category,
                message = %outcome.message,
                "Row skipped"
            ),
            OutcomeCategory::NotFound | OutcomeCategory::Error => warn!(
                run_id = %run_id,
                row = outcome.row,
                category = %outcome.category,
                message = %outcome.message,
                "Row not migrated"
            ),
        }
    }
}
