//! SQLite record store.
//!
//! Every function takes a `&Connection`, so the same calls work on a plain
//! connection, a transaction or a savepoint.

mod employees;
mod periods;
mod schema;

pub use employees::{
    find_employee, find_employee_by_national_id, find_employee_by_number, insert_employee,
};
pub use periods::{clear_periods, count_periods, insert_period, period_exists, periods_for};
pub use schema::{ensure_schema, open_store};
