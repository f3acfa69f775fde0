//! Employee lookups.
//!
//! Employees are read-only for the migration; [`insert_employee`] exists to
//! seed stores for imports and tests.

use rusqlite::types::{Value, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::error::MigrationResult;
use crate::models::{Employee, RawDate};

const SELECT_EMPLOYEE: &str =
    "SELECT personal_id, employee_number, national_id, full_name, hire_date FROM employees";

fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    let hire_date = match row.get_ref(4)? {
        ValueRef::Null => None,
        ValueRef::Integer(serial) => Some(RawDate::Serial(serial as f64)),
        ValueRef::Real(serial) => Some(RawDate::Serial(serial)),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            let text = String::from_utf8_lossy(bytes).trim().to_string();
            if text.is_empty() {
                None
            } else {
                Some(RawDate::Text(text))
            }
        }
    };

    Ok(Employee {
        personal_id: row.get(0)?,
        employee_number: row.get(1)?,
        national_id: row.get(2)?,
        full_name: row.get(3)?,
        hire_date,
    })
}

/// Looks up an employee by employee number.
pub fn find_employee_by_number(conn: &Connection, number: i64) -> MigrationResult<Option<Employee>> {
    let employee = conn
        .query_row(
            &format!("{} WHERE employee_number = ?1", SELECT_EMPLOYEE),
            params![number],
            employee_from_row,
        )
        .optional()?;
    Ok(employee)
}

/// Looks up an employee by national id.
///
/// When several rows share the id, the one with the lowest internal id wins.
pub fn find_employee_by_national_id(
    conn: &Connection,
    national_id: &str,
) -> MigrationResult<Option<Employee>> {
    let employee = conn
        .query_row(
            &format!(
                "{} WHERE national_id = ?1 ORDER BY personal_id LIMIT 1",
                SELECT_EMPLOYEE
            ),
            params![national_id],
            employee_from_row,
        )
        .optional()?;
    Ok(employee)
}

/// Resolves an employee by number first, then by national id.
pub fn find_employee(
    conn: &Connection,
    employee_number: Option<i64>,
    national_id: Option<&str>,
) -> MigrationResult<Option<Employee>> {
    if let Some(number) = employee_number {
        if let Some(employee) = find_employee_by_number(conn, number)? {
            return Ok(Some(employee));
        }
    }

    match national_id {
        Some(national_id) => find_employee_by_national_id(conn, national_id),
        None => Ok(None),
    }
}

/// Inserts an employee row, keeping the hire date in its raw shape.
pub fn insert_employee(conn: &Connection, employee: &Employee) -> MigrationResult<()> {
    let hire_date = match &employee.hire_date {
        None => Value::Null,
        Some(RawDate::Text(text)) => Value::Text(text.clone()),
        Some(RawDate::Serial(serial)) => Value::Real(*serial),
    };

    conn.execute(
        "INSERT INTO employees (personal_id, employee_number, national_id, full_name, hire_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            employee.personal_id,
            employee.employee_number,
            employee.national_id,
            employee.full_name,
            hire_date,
        ],
    )?;
    Ok(())
}
