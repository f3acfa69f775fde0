//! Vacation period persistence.

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, Row, ToSql, params};

use crate::error::MigrationResult;
use crate::models::{PeriodKind, VacationPeriod};

impl ToSql for PeriodKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.code()))
    }
}

impl FromSql for PeriodKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let code = i64::column_result(value)?;
        PeriodKind::from_code(code).ok_or(FromSqlError::OutOfRange(code))
    }
}

/// Checks whether a period with the same owner, range and kind is stored.
pub fn period_exists(conn: &Connection, period: &VacationPeriod) -> MigrationResult<bool> {
    let exists = conn.query_row(
        "SELECT EXISTS (
             SELECT 1 FROM vacation_periods
             WHERE national_id = ?1 AND start_date = ?2 AND end_date = ?3 AND kind = ?4
         )",
        params![
            period.national_id,
            period.start_date,
            period.end_date,
            period.kind
        ],
        |row| row.get(0),
    )?;
    Ok(exists)
}

/// Inserts a period and returns its row id.
pub fn insert_period(conn: &Connection, period: &VacationPeriod) -> MigrationResult<i64> {
    conn.execute(
        "INSERT INTO vacation_periods (
             national_id, kind, start_date, end_date, assigned, balance, expired,
             status, description, created_by, created_at, effective_date,
             previous_balance, resolution_number, resolution_date
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            period.national_id,
            period.kind,
            period.start_date,
            period.end_date,
            period.assigned,
            period.balance,
            period.expired,
            period.status,
            period.description,
            period.created_by,
            period.created_at,
            period.effective_date,
            period.previous_balance,
            period.resolution_number,
            period.resolution_date,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Deletes every stored period and returns how many were removed.
pub fn clear_periods(conn: &Connection) -> MigrationResult<usize> {
    let removed = conn.execute("DELETE FROM vacation_periods", [])?;
    Ok(removed)
}

fn period_from_row(row: &Row<'_>) -> rusqlite::Result<VacationPeriod> {
    Ok(VacationPeriod {
        id: row.get(0)?,
        national_id: row.get(1)?,
        kind: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
        assigned: row.get(5)?,
        balance: row.get(6)?,
        expired: row.get(7)?,
        status: row.get(8)?,
        description: row.get(9)?,
        created_by: row.get(10)?,
        created_at: row.get(11)?,
        effective_date: row.get(12)?,
        previous_balance: row.get(13)?,
        resolution_number: row.get(14)?,
        resolution_date: row.get(15)?,
    })
}

/// Returns an employee's stored periods, newest first.
pub fn periods_for(conn: &Connection, national_id: &str) -> MigrationResult<Vec<VacationPeriod>> {
    let mut stmt = conn.prepare(
        "SELECT id, national_id, kind, start_date, end_date, assigned, balance, expired,
                status, description, created_by, created_at, effective_date,
                previous_balance, resolution_number, resolution_date
         FROM vacation_periods
         WHERE national_id = ?1
         ORDER BY start_date DESC, id DESC",
    )?;
    let periods = stmt
        .query_map(params![national_id], period_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(periods)
}

/// Counts every stored period.
pub fn count_periods(conn: &Connection) -> MigrationResult<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM vacation_periods", [], |row| row.get(0))?;
    Ok(count)
}
