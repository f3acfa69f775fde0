//! Column resolution and row extraction.
//!
//! Maps the configured column names onto sheet positions and pulls the
//! cells the migration needs out of every data row.

use crate::config::ColumnMapping;
use crate::error::{MigrationError, MigrationResult};

use super::clean::clean_text;
use super::spreadsheet::{CellValue, SheetTable};

/// Sheet positions of the configured columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndexes {
    /// Employee number column.
    pub employee_number: Option<usize>,
    /// National id column.
    pub national_id: Option<usize>,
    /// Pending days column.
    pub days_pending: usize,
    /// Expired days column.
    pub days_expired: Option<usize>,
}

/// The raw cells of one data row.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceRow {
    /// Sheet row number (header is row 1).
    pub row_number: usize,
    /// Employee number cell.
    pub employee_number: CellValue,
    /// National id cell.
    pub national_id: CellValue,
    /// Pending days cell.
    pub days_pending: CellValue,
    /// Expired days cell; `Empty` when the column is not configured.
    pub days_expired: CellValue,
}

/// The rows extracted from a sheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSheet {
    /// Data rows in the sheet.
    pub total_rows: usize,
    /// Rows with an identifier and a pending days value.
    pub rows: Vec<BalanceRow>,
}

/// Finds every configured column in the header row.
///
/// Headers and configured names are compared after [`clean_text`].
///
/// # Errors
///
/// Returns [`MigrationError::MissingColumns`] naming every configured column
/// that is absent.
pub fn resolve_columns(
    headers: &[String],
    mapping: &ColumnMapping,
) -> MigrationResult<ColumnIndexes> {
    let normalized: Vec<String> = headers.iter().map(|h| clean_text(h)).collect();
    let mut missing = Vec::new();

    let mut find = |name: &str| -> Option<usize> {
        let wanted = clean_text(name);
        let position = normalized.iter().position(|h| *h == wanted);
        if position.is_none() {
            missing.push(name.to_string());
        }
        position
    };

    let employee_number = mapping.employee_number.as_deref().and_then(&mut find);
    let national_id = mapping.national_id.as_deref().and_then(&mut find);
    let days_pending = find(mapping.days_pending.as_str());
    let days_expired = mapping.days_expired.as_deref().and_then(&mut find);

    match days_pending {
        Some(days_pending) if missing.is_empty() => Ok(ColumnIndexes {
            employee_number,
            national_id,
            days_pending,
            days_expired,
        }),
        _ => Err(MigrationError::MissingColumns { columns: missing }),
    }
}

/// Extracts the balance rows from a sheet.
///
/// Rows without any identifier cell or without a pending days cell are
/// dropped; they are still counted in [`BalanceSheet::total_rows`].
///
/// # Example
///
/// ```
/// use vacation_migration::config::ColumnMapping;
/// use vacation_migration::source::{extract_rows, CellValue, SheetTable};
///
/// let table = SheetTable {
///     headers: vec!["No.  D mplado".into(), "DIAS PENDIENTES A LA FECHA".into()],
///     rows: vec![
///         vec![CellValue::Text("E03940".into()), CellValue::Number(45.0)],
///         vec![CellValue::Empty, CellValue::Number(10.0)],
///     ],
/// };
/// let mapping = ColumnMapping {
///     employee_number: Some("No. D mplado".into()),
///     national_id: None,
///     days_pending: "DIAS PENDIENTES A LA FECHA".into(),
///     days_expired: None,
/// };
///
/// let sheet = extract_rows(&table, &mapping).unwrap();
/// assert_eq!(sheet.total_rows, 2);
/// assert_eq!(sheet.rows.len(), 1);
/// assert_eq!(sheet.rows[0].row_number, 2);
/// ```
pub fn extract_rows(table: &SheetTable, mapping: &ColumnMapping) -> MigrationResult<BalanceSheet> {
    let columns = resolve_columns(&table.headers, mapping)?;

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| BalanceRow {
            row_number: i + 2,
            employee_number: cell_at(row, columns.employee_number),
            national_id: cell_at(row, columns.national_id),
            days_pending: cell_at(row, Some(columns.days_pending)),
            days_expired: cell_at(row, columns.days_expired),
        })
        .filter(|row| {
            let has_identifier = !row.employee_number.is_blank() || !row.national_id.is_blank();
            has_identifier && !row.days_pending.is_blank()
        })
        .collect();

    Ok(BalanceSheet {
        total_rows: table.rows.len(),
        rows,
    })
}

fn cell_at(row: &[CellValue], index: Option<usize>) -> CellValue {
    index
        .and_then(|i| row.get(i))
        .cloned()
        .unwrap_or(CellValue::Empty)
}
