//! Spreadsheet reading.
//!
//! Opens a workbook with `calamine` and loads one sheet into a
//! [`SheetTable`]: the first row as headers, every later row as cells.

use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use crate::error::{MigrationError, MigrationResult};

/// A single cell value, reduced to what the migration distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Blank, error or missing cell.
    Empty,
    /// Non-blank text, trimmed.
    Text(String),
    /// Any numeric cell; date cells become their serial day number.
    Number(f64),
}

impl CellValue {
    /// Returns true for blank cells.
    pub fn is_blank(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Renders the cell as text; integral numbers have no decimal part.
    ///
    /// # Example
    ///
    /// ```
    /// use vacation_migration::source::CellValue;
    ///
    /// assert_eq!(CellValue::Number(3940.0).to_text(), "3940");
    /// assert_eq!(CellValue::Number(12.5).to_text(), "12.5");
    /// assert_eq!(CellValue::Empty.to_text(), "");
    /// ```
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(text) => text.clone(),
            CellValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    format!("{}", *value as i64)
                } else {
                    value.to_string()
                }
            }
        }
    }
}

impl From<&Data> for CellValue {
    fn from(data: &Data) -> Self {
        match data {
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(trimmed.to_string())
                }
            }
            Data::Float(f) => CellValue::Number(*f),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
            Data::Error(_) | Data::Empty => CellValue::Empty,
        }
    }
}

/// A sheet loaded into memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetTable {
    /// Header cells of the first row, as text.
    pub headers: Vec<String>,
    /// Data rows, in sheet order. Row `i` is sheet row `i + 2`.
    pub rows: Vec<Vec<CellValue>>,
}

/// Reads one sheet of a workbook.
///
/// Uses the named sheet, or the first sheet when `sheet` is `None`.
///
/// # Errors
///
/// Returns [`MigrationError::SpreadsheetRead`] when the file is missing, is
/// not a readable workbook, or has no sheet with the requested name.
pub fn read_table(path: &Path, sheet: Option<&str>) -> MigrationResult<SheetTable> {
    let path_str = path.display().to_string();
    let read_error = |message: String| MigrationError::SpreadsheetRead {
        path: path_str.clone(),
        message,
    };

    if !path.exists() {
        return Err(read_error("file not found".to_string()));
    }

    let mut workbook = open_workbook_auto(path).map_err(|e| read_error(e.to_string()))?;
    let names = workbook.sheet_names().to_owned();

    let sheet_name = match sheet {
        Some(name) => names
            .iter()
            .find(|candidate| candidate.as_str() == name)
            .cloned()
            .ok_or_else(|| read_error(format!("sheet '{}' not found", name)))?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| read_error("workbook has no sheets".to_string()))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| read_error(e.to_string()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .map(|header| header.iter().map(|cell| CellValue::from(cell).to_text()).collect())
        .unwrap_or_default();
    let rows = rows
        .map(|row| row.iter().map(CellValue::from).collect())
        .collect();

    Ok(SheetTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_a_read_error() {
        match read_table(Path::new("/nonexistent/VACACIONES.xlsx"), None) {
            Err(MigrationError::SpreadsheetRead { path, message }) => {
                assert!(path.ends_with("VACACIONES.xlsx"));
                assert_eq!(message, "file not found");
            }
            other => panic!("Expected SpreadsheetRead, got {:?}", other),
        }
    }

    #[test]
    fn test_non_workbook_file_is_a_read_error() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        std::fs::write(file.path(), b"not a workbook").unwrap();

        assert!(matches!(
            read_table(file.path(), None),
            Err(MigrationError::SpreadsheetRead { .. })
        ));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(CellValue::from(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(
            CellValue::from(&Data::String("  E03940 ".to_string())),
            CellValue::Text("E03940".to_string())
        );
        assert_eq!(
            CellValue::from(&Data::String("   ".to_string())),
            CellValue::Empty
        );
        assert_eq!(CellValue::from(&Data::Empty), CellValue::Empty);
    }

    #[test]
    fn test_text_rendering_of_large_numbers() {
        assert_eq!(CellValue::Number(-3.0).to_text(), "-3");
        assert_eq!(CellValue::Number(1e20).to_text(), "100000000000000000000");
    }
}
