//! Record store schema.

use rusqlite::Connection;
use std::path::Path;

use crate::error::MigrationResult;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS employees (
    personal_id INTEGER PRIMARY KEY,
    employee_number INTEGER UNIQUE,
    national_id TEXT NOT NULL,
    full_name TEXT NOT NULL,
    hire_date
);

CREATE INDEX IF NOT EXISTS idx_employees_national_id ON employees (national_id);

CREATE TABLE IF NOT EXISTS vacation_periods (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    national_id TEXT NOT NULL,
    kind INTEGER NOT NULL,
    start_date TEXT NOT NULL,
    end_date TEXT NOT NULL,
    assigned INTEGER NOT NULL,
    balance INTEGER NOT NULL,
    expired INTEGER NOT NULL,
    status INTEGER NOT NULL,
    description TEXT NOT NULL,
    created_by TEXT NOT NULL,
    created_at TEXT NOT NULL,
    effective_date TEXT NOT NULL,
    previous_balance INTEGER NOT NULL,
    resolution_number TEXT NOT NULL,
    resolution_date TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_vacation_periods_range
    ON vacation_periods (national_id, start_date, end_date, kind);
";

/// Creates the `employees` and `vacation_periods` tables when absent.
///
/// `employees.hire_date` has no declared type: legacy rows keep whatever the
/// HR system stored there (text in several formats or a serial number).
pub fn ensure_schema(conn: &Connection) -> MigrationResult<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Opens the SQLite database at `path` and ensures the schema exists.
///
/// # Errors
///
/// Returns [`crate::error::MigrationError::Database`] when the file cannot
/// be opened or the schema cannot be created.
pub fn open_store(path: &Path) -> MigrationResult<Connection> {
    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('employees', 'vacation_periods')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 2);
    }

    #[test]
    fn test_open_store_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hr.db");

        let conn = open_store(&path).unwrap();
        drop(conn);

        assert!(path.exists());
    }
}
