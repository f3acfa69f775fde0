//! Integration tests for the vacation migration.
//!
//! This test suite runs the migration driver end to end against an in-memory
//! SQLite store:
//! - Spreadsheet extraction through to stored periods
//! - Outcome classification per row
//! - Re-runs under the skip policy
//! - Reset runs
//! - Transaction commit and rollback
//! - Per-employee savepoint rollback on database errors

use chrono::NaiveDate;
use rusqlite::Connection;

use vacation_migration::config::{
    AccrualRules, ColumnMapping, ConfigLoader, ExistingPeriodPolicy, RunConfig,
};
use vacation_migration::migration::{MigrationSummary, RunContext, VacationMigrator};
use vacation_migration::models::{Employee, OutcomeCategory, PeriodKind, RawDate};
use vacation_migration::source::{BalanceSheet, CellValue, SheetTable, extract_rows};
use vacation_migration::store::{count_periods, ensure_schema, insert_employee, periods_for};

// =============================================================================
// Test Helpers
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_context() -> RunContext {
    RunContext::new(date(2024, 6, 1).and_hms_opt(9, 0, 0).unwrap())
}

fn create_migrator(policy: ExistingPeriodPolicy) -> VacationMigrator {
    let run = RunConfig {
        existing_periods: policy,
        ..RunConfig::default()
    };
    VacationMigrator::new(run, AccrualRules::default(), create_context())
}

fn employee(
    personal_id: i64,
    number: Option<i64>,
    national_id: &str,
    hire_date: Option<RawDate>,
) -> Employee {
    Employee {
        personal_id,
        employee_number: number,
        national_id: national_id.to_string(),
        full_name: format!("Employee {}", personal_id),
        hire_date,
    }
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

/// A store seeded with the employees the sheet refers to.
fn create_store() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    ensure_schema(&conn).unwrap();

    let employees = [
        employee(1, Some(3940), "8-123-456", Some(RawDate::Text("2020-05-15".into()))),
        employee(2, Some(1207), "PE-9-1234", Some(RawDate::Serial(43966.0))),
        employee(3, Some(2001), "4-700-1", None),
        employee(
            4,
            Some(2002),
            "3-22-333",
            Some(RawDate::Text("16 de junio de 2022".into())),
        ),
        employee(5, Some(2003), "9-9-9", Some(RawDate::Text("01/03/2015".into()))),
    ];
    for employee in &employees {
        insert_employee(&conn, employee).unwrap();
    }
    conn
}

fn mapping() -> ColumnMapping {
    ColumnMapping {
        employee_number: Some("No. D mplado".to_string()),
        national_id: Some("CEDULA".to_string()),
        days_pending: "DIAS PENDIENTES A LA FECHA".to_string(),
        days_expired: Some("DIAS VENCIDOS".to_string()),
    }
}

fn sheet(rows: Vec<Vec<CellValue>>) -> BalanceSheet {
    let table = SheetTable {
        headers: vec![
            "NOMBRE".to_string(),
            "No.  D mplado".to_string(),
            "CEDULA".to_string(),
            "DIAS PENDIENTES A LA FECHA".to_string(),
            "DIAS VENCIDOS".to_string(),
        ],
        rows,
    };
    extract_rows(&table, &mapping()).unwrap()
}

/// The mixed sheet used by most scenarios.
fn standard_sheet() -> BalanceSheet {
    sheet(vec![
        // Row 2: migrated, three periods
        vec![text("Ana"), text("E03940"), CellValue::Empty, num(45.0), num(10.0)],
        // Row 3: migrated by national id, serial hire date
        vec![text("Luis"), CellValue::Empty, text("'PE-9-1234 -"), text("20"), CellValue::Empty],
        // Row 4: no hire date on record
        vec![text("Rosa"), num(2001.0), CellValue::Empty, num(15.0), num(0.0)],
        // Row 5: negative balance adjustment
        vec![text("Juan"), num(2002.0), CellValue::Empty, num(-4.0), num(3.0)],
        // Row 6: unknown employee
        vec![text("Nadie"), num(5555.0), CellValue::Empty, num(12.0), num(0.0)],
        // Row 7: nothing to migrate
        vec![text("Eva"), num(2003.0), CellValue::Empty, num(0.0), num(0.0)],
        // Row 8: identifier without digits
        vec![text("Sin"), text("N/A"), CellValue::Empty, num(8.0), num(0.0)],
        // Row 9: dropped, no pending days
        vec![text("Vacía"), num(2003.0), CellValue::Empty, CellValue::Empty, num(5.0)],
    ])
}

fn outcome_for(summary: &MigrationSummary, row: usize) -> OutcomeCategory {
    summary
        .outcomes
        .iter()
        .find(|o| o.row == row)
        .map(|o| o.category)
        .unwrap_or_else(|| panic!("No outcome recorded for row {}", row))
}

// =============================================================================
// SECTION 1: Outcome Classification
// =============================================================================

#[test]
fn test_standard_sheet_counts() {
    let mut conn = create_store();
    let summary = create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    assert_eq!(summary.rows_read, 8);
    assert_eq!(summary.valid_rows, 7);
    assert_eq!(summary.migrated, 3);
    assert_eq!(summary.not_found, 1);
    assert_eq!(summary.no_days, 1);
    assert_eq!(summary.errors, 2);
    assert_eq!(summary.already_existing, 0);
    assert_eq!(summary.periods_created, 5);
    assert!(summary.committed);
    assert_eq!(count_periods(&conn).unwrap(), 5);
}

#[test]
fn test_each_row_gets_its_category() {
    let mut conn = create_store();
    let summary = create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    assert_eq!(outcome_for(&summary, 2), OutcomeCategory::Migrated);
    assert_eq!(outcome_for(&summary, 3), OutcomeCategory::Migrated);
    assert_eq!(outcome_for(&summary, 4), OutcomeCategory::Error);
    assert_eq!(outcome_for(&summary, 5), OutcomeCategory::Migrated);
    assert_eq!(outcome_for(&summary, 6), OutcomeCategory::NotFound);
    assert_eq!(outcome_for(&summary, 7), OutcomeCategory::NoDays);
    assert_eq!(outcome_for(&summary, 8), OutcomeCategory::Error);
}

#[test]
fn test_error_messages_name_the_cause() {
    let mut conn = create_store();
    let summary = create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let messages: Vec<&str> = summary
        .outcomes_in(OutcomeCategory::Error)
        .map(|o| o.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Employee '2001' has no hire date",
            "Invalid employee identifier 'N/A'",
        ]
    );

    let not_found = summary.outcomes_in(OutcomeCategory::NotFound).next().unwrap();
    assert_eq!(not_found.message, "No employee found for employee number 5555");
}

// =============================================================================
// SECTION 2: Stored Periods
// =============================================================================

/// VP-001: mixed pending and expired balances end up in three periods
#[test]
fn test_stored_periods_for_mixed_balance() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let periods = periods_for(&conn, "8-123-456").unwrap();
    let ranges: Vec<_> = periods
        .iter()
        .map(|p| (p.start_date, p.end_date, p.balance, p.expired))
        .collect();

    assert_eq!(
        ranges,
        vec![
            (date(2023, 5, 15), date(2024, 5, 14), 30, 0),
            (date(2022, 5, 15), date(2023, 5, 14), 15, 0),
            (date(2020, 5, 15), date(2021, 5, 14), 0, 10),
        ]
    );
}

#[test]
fn test_stored_periods_carry_audit_fields() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let newest = &periods_for(&conn, "8-123-456").unwrap()[0];
    assert_eq!(newest.kind, PeriodKind::Regular);
    assert_eq!(newest.assigned, 30);
    assert_eq!(newest.status, 1);
    assert_eq!(newest.created_by, "MIGRACION_VACACIONES");
    assert_eq!(newest.created_at, date(2024, 6, 1).and_hms_opt(9, 0, 0).unwrap());
    assert_eq!(newest.effective_date, date(2024, 6, 1));
    assert_eq!(newest.resolution_date, date(2024, 6, 1));
    assert_eq!(newest.resolution_number, "MIG-3940-2023");
    assert_eq!(newest.previous_balance, 0);
    assert_eq!(
        newest.description,
        "Historical balance migrated (30 balance, 0 expired) - Period 2023-2024"
    );
}

#[test]
fn test_serial_hire_date_and_national_id_lookup() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let periods = periods_for(&conn, "PE-9-1234").unwrap();
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].start_date, date(2023, 5, 15));
    assert_eq!(periods[0].end_date, date(2024, 5, 14));
    assert_eq!(periods[0].balance, 20);
}

/// VP-006: negative pending becomes one adjustment for the current year
#[test]
fn test_negative_balance_stored_as_adjustment() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let periods = periods_for(&conn, "3-22-333").unwrap();
    assert_eq!(periods.len(), 1);

    let adjustment = &periods[0];
    assert_eq!(adjustment.kind, PeriodKind::Adjustment);
    assert_eq!(adjustment.start_date, date(2023, 6, 16));
    assert_eq!(adjustment.end_date, date(2024, 6, 15));
    assert_eq!(adjustment.assigned, 0);
    assert_eq!(adjustment.balance, -4);
    assert_eq!(adjustment.expired, 0);
}

// =============================================================================
// SECTION 3: Existing Period Policies
// =============================================================================

#[test]
fn test_rerun_with_skip_finds_everything_existing() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let second = create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    assert_eq!(second.migrated, 0);
    assert_eq!(second.already_existing, 3);
    assert_eq!(second.periods_created, 0);
    assert_eq!(second.periods_skipped, 5);
    assert!(!second.committed);
    assert_eq!(count_periods(&conn).unwrap(), 5);
}

#[test]
fn test_partial_overlap_creates_only_missing_periods() {
    let mut conn = create_store();
    let first = sheet(vec![vec![
        text("Ana"),
        num(3940.0),
        CellValue::Empty,
        num(30.0),
        num(0.0),
    ]]);
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &first)
        .unwrap();

    let second = create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let ana = second.outcomes.iter().find(|o| o.row == 2).unwrap();
    assert_eq!(ana.category, OutcomeCategory::Migrated);
    assert_eq!(ana.periods_created, 2);
    assert_eq!(ana.periods_existing, 1);
    assert!(ana.message.ends_with("; 1 period(s) already existed"));
    assert_eq!(periods_for(&conn, "8-123-456").unwrap().len(), 3);
}

#[test]
fn test_reset_replaces_stored_periods() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let reset = create_migrator(ExistingPeriodPolicy::Reset)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    assert_eq!(reset.periods_cleared, 5);
    assert_eq!(reset.periods_created, 5);
    assert_eq!(reset.migrated, 3);
    assert!(reset.committed);
    assert_eq!(count_periods(&conn).unwrap(), 5);
}

#[test]
fn test_reset_without_new_periods_is_rolled_back() {
    let mut conn = create_store();
    create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    let only_unknown = sheet(vec![vec![
        text("Nadie"),
        num(5555.0),
        CellValue::Empty,
        num(12.0),
        num(0.0),
    ]]);
    let reset = create_migrator(ExistingPeriodPolicy::Reset)
        .run(&mut conn, &only_unknown)
        .unwrap();

    assert_eq!(reset.periods_cleared, 5);
    assert!(!reset.committed);
    assert_eq!(count_periods(&conn).unwrap(), 5);
}

// =============================================================================
// SECTION 4: Transactions
// =============================================================================

#[test]
fn test_nothing_created_rolls_back() {
    let mut conn = create_store();
    let summary = create_migrator(ExistingPeriodPolicy::Skip)
        .run(
            &mut conn,
            &sheet(vec![vec![
                text("Eva"),
                num(2003.0),
                CellValue::Empty,
                num(0.0),
                num(0.0),
            ]]),
        )
        .unwrap();

    assert_eq!(summary.no_days, 1);
    assert!(!summary.committed);
    assert_eq!(count_periods(&conn).unwrap(), 0);
}

#[test]
fn test_database_error_rolls_back_only_that_employee() {
    let mut conn = create_store();
    // Reject the expired period of one employee, after their balance periods
    // were already inserted.
    conn.execute_batch(
        "CREATE TRIGGER reject_expired BEFORE INSERT ON vacation_periods
         WHEN NEW.national_id = '8-123-456' AND NEW.expired > 0
         BEGIN
             SELECT RAISE(ABORT, 'expired periods are locked');
         END;",
    )
    .unwrap();

    let summary = create_migrator(ExistingPeriodPolicy::Skip)
        .run(&mut conn, &standard_sheet())
        .unwrap();

    assert_eq!(outcome_for(&summary, 2), OutcomeCategory::Error);
    let failed = summary.outcomes.iter().find(|o| o.row == 2).unwrap();
    assert!(failed.message.starts_with("Inserts rolled back"));
    assert!(failed.message.contains("expired periods are locked"));

    assert!(summary.committed);
    assert_eq!(summary.periods_created, 2);
    assert!(periods_for(&conn, "8-123-456").unwrap().is_empty());
    assert_eq!(periods_for(&conn, "PE-9-1234").unwrap().len(), 1);
}

// =============================================================================
// SECTION 5: Configuration
// =============================================================================

#[test]
fn test_shipped_configuration_drives_a_run() {
    let config = ConfigLoader::load("./config/migration.yaml")
        .expect("Failed to load config")
        .into_config();

    let table = SheetTable {
        headers: vec![
            "No. D mplado".to_string(),
            "DIAS PENDIENTES A LA FECHA".to_string(),
            "DIAS VENCIDOS".to_string(),
        ],
        rows: vec![vec![text("E03940"), num(45.0), num(10.0)]],
    };
    let sheet = extract_rows(&table, &config.input.columns).unwrap();

    let mut conn = create_store();
    let summary = VacationMigrator::from_config(&config, create_context())
        .run(&mut conn, &sheet)
        .unwrap();

    assert_eq!(summary.migrated, 1);
    assert_eq!(summary.periods_created, 3);
}
