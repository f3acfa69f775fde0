//! Field cleaning for spreadsheet values.
//!
//! HR exports carry identifiers with prefixes and stray punctuation, and day
//! counts as integers, floats or text. These helpers turn cells into the
//! typed values the migration works with.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

use super::spreadsheet::CellValue;

/// Collapses internal whitespace runs to a single space and trims the ends.
///
/// # Example
///
/// ```
/// use vacation_migration::source::clean_text;
///
/// assert_eq!(clean_text("  DIAS   PENDIENTES\tA LA FECHA "), "DIAS PENDIENTES A LA FECHA");
/// ```
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts an employee number from a cell.
///
/// Text keeps only its digits (`"E03940"` becomes `3940`). Numeric cells are
/// truncated. Returns `None` for blank cells, text without digits, negative
/// numbers, and values too large for an `i64`.
///
/// # Example
///
/// ```
/// use vacation_migration::source::{clean_employee_number, CellValue};
///
/// assert_eq!(clean_employee_number(&CellValue::Text("E03940".into())), Some(3940));
/// assert_eq!(clean_employee_number(&CellValue::Number(1207.0)), Some(1207));
/// assert_eq!(clean_employee_number(&CellValue::Text("N/A".into())), None);
/// ```
pub fn clean_employee_number(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(value) => {
            if value.is_finite() && *value >= 0.0 {
                Decimal::from_f64_retain(value.trunc())?.to_i64()
            } else {
                None
            }
        }
        CellValue::Text(text) => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                None
            } else {
                digits.parse().ok()
            }
        }
    }
}

/// Cleans a national id cell.
///
/// Surrounding whitespace and quote characters are removed, as are trailing
/// dashes left by the export (`"8-123-456 -"` becomes `"8-123-456"`).
///
/// # Example
///
/// ```
/// use vacation_migration::source::{clean_national_id, CellValue};
///
/// assert_eq!(
///     clean_national_id(&CellValue::Text("'8-123-456 -".into())),
///     Some("8-123-456".to_string())
/// );
/// ```
pub fn clean_national_id(cell: &CellValue) -> Option<String> {
    let text = match cell {
        CellValue::Empty => return None,
        CellValue::Number(value) => CellValue::Number(*value).to_text(),
        CellValue::Text(text) => text.clone(),
    };

    let unquoted: String = text.chars().filter(|c| *c != '\'' && *c != '"').collect();
    let cleaned = unquoted.trim().trim_end_matches([' ', '-']).trim();

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Parses a day quantity, truncating any fraction toward zero.
///
/// Text accepts a decimal point or a decimal comma. Returns `None` for blank
/// cells and text that is not a number.
///
/// # Example
///
/// ```
/// use vacation_migration::source::{parse_day_quantity, CellValue};
///
/// assert_eq!(parse_day_quantity(&CellValue::Number(45.0)), Some(45));
/// assert_eq!(parse_day_quantity(&CellValue::Text("12,7".into())), Some(12));
/// assert_eq!(parse_day_quantity(&CellValue::Text("-3.5".into())), Some(-3));
/// assert_eq!(parse_day_quantity(&CellValue::Text("n/d".into())), None);
/// ```
pub fn parse_day_quantity(cell: &CellValue) -> Option<i64> {
    match cell {
        CellValue::Empty => None,
        CellValue::Number(value) => {
            if value.is_finite() {
                Decimal::from_f64_retain(value.trunc())?.to_i64()
            } else {
                None
            }
        }
        CellValue::Text(text) => {
            let normalized = text.trim().replace(',', ".");
            if normalized.is_empty() {
                return None;
            }
            Decimal::from_str(&normalized).ok()?.trunc().to_i64()
        }
    }
}
