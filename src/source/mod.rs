//! Balance spreadsheet input.
//!
//! Reads the HR balance export, locates the configured columns and cleans
//! the identifier and day count cells of every row.

mod clean;
mod columns;
mod spreadsheet;

pub use clean::{clean_employee_number, clean_national_id, clean_text, parse_day_quantity};
pub use columns::{BalanceRow, BalanceSheet, ColumnIndexes, extract_rows, resolve_columns};
pub use spreadsheet::{CellValue, SheetTable, read_table};
