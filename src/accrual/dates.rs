//! Date utilities for accrual calculations.
//!
//! This module builds anniversary dates that survive month-end and leap-day
//! edge cases, and normalises the assorted date representations found in
//! legacy HR data into a single [`NaiveDate`].

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

use crate::error::{MigrationError, MigrationResult};
use crate::models::RawDate;

/// Date-only formats accepted by [`parse_date_lenient`], tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Date-time formats accepted by [`parse_date_lenient`]; the time is dropped.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%d/%m/%Y %H:%M:%S",
];

const SPANISH_MONTHS: &[(&str, u32)] = &[
    ("enero", 1),
    ("febrero", 2),
    ("marzo", 3),
    ("abril", 4),
    ("mayo", 5),
    ("junio", 6),
    ("julio", 7),
    ("agosto", 8),
    ("septiembre", 9),
    ("setiembre", 9),
    ("octubre", 10),
    ("noviembre", 11),
    ("diciembre", 12),
];

/// Largest spreadsheet serial accepted (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Builds a date, clamping a day past the end of the month to the month's
/// last day.
///
/// This is what makes a 29 February anniversary land on 28 February in
/// non-leap years.
///
/// # Errors
///
/// Returns [`MigrationError::DateConstruction`] when the month is invalid,
/// the day is zero, or the year is outside the supported calendar range.
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::safe_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(safe_date(2023, 2, 29).unwrap(), NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
/// assert_eq!(safe_date(2024, 2, 29).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(safe_date(2024, 4, 31).unwrap(), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
/// assert!(safe_date(2024, 13, 1).is_err());
/// ```
pub fn safe_date(year: i32, month: u32, day: u32) -> MigrationResult<NaiveDate> {
    let error = || MigrationError::DateConstruction { year, month, day };

    if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        return Ok(date);
    }

    let last = last_day_of_month(year, month).ok_or_else(error)?;
    if day > last.day() { Ok(last) } else { Err(error()) }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Returns the hire-date anniversary falling in `year`.
pub fn anniversary_in(hire_date: NaiveDate, year: i32) -> MigrationResult<NaiveDate> {
    safe_date(year, hire_date.month(), hire_date.day())
}

/// Returns the latest anniversary of `hire_date` on or before `today`.
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::anniversary_on_or_before;
/// use chrono::NaiveDate;
///
/// let hire = NaiveDate::from_ymd_opt(2020, 5, 15).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// assert_eq!(
///     anniversary_on_or_before(hire, today).unwrap(),
///     NaiveDate::from_ymd_opt(2023, 5, 15).unwrap()
/// );
/// ```
pub fn anniversary_on_or_before(
    hire_date: NaiveDate,
    today: NaiveDate,
) -> MigrationResult<NaiveDate> {
    let this_year = anniversary_in(hire_date, today.year())?;
    if this_year <= today {
        Ok(this_year)
    } else {
        anniversary_in(hire_date, today.year() - 1)
    }
}

/// Converts a spreadsheet serial day number into a date.
///
/// Serials count days from 1899-12-30; any fractional time part is ignored.
/// Returns `None` for non-finite, non-positive or out-of-range serials.
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::date_from_excel_serial;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     date_from_excel_serial(45292.75),
///     NaiveDate::from_ymd_opt(2024, 1, 1)
/// );
/// ```
pub fn date_from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 || serial > MAX_EXCEL_SERIAL {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.trunc() as u64))
}

/// Parses a date written in any of the formats found in HR exports.
///
/// Accepted, in order of preference:
/// - ISO dates (`2020-05-15`), day-first dates (`15/05/2020`, `15-05-2020`)
///   and `2020/05/15`
/// - ISO and day-first date-times, with the time dropped
/// - Spanish long form (`15 de mayo de 2020`, optionally preceded by a weekday)
/// - spreadsheet serial numbers written as text (`43966`)
///
/// # Example
///
/// ```
/// use vacation_migration::accrual::parse_date_lenient;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2020, 5, 15);
/// assert_eq!(parse_date_lenient("2020-05-15"), expected);
/// assert_eq!(parse_date_lenient("15/05/2020"), expected);
/// assert_eq!(parse_date_lenient("2020-05-15 00:00:00"), expected);
/// assert_eq!(parse_date_lenient("viernes, 15 de mayo de 2020"), expected);
/// assert_eq!(parse_date_lenient("sin fecha"), None);
/// ```
pub fn parse_date_lenient(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }

    if let Some(date) = parse_spanish_long_form(text) {
        return Some(date);
    }

    text.parse::<f64>().ok().and_then(date_from_excel_serial)
}

/// Parses `<day> de <month> de <year>`, also accepting `del` before the year.
fn parse_spanish_long_form(text: &str) -> Option<NaiveDate> {
    let lowered = text.to_lowercase().replace('.', "").replace(',', " ");
    let tokens: Vec<&str> = lowered.split_whitespace().collect();

    tokens.windows(5).find_map(|window| {
        let [day, de, month, de_year, year] = window else {
            return None;
        };
        if *de != "de" || !matches!(*de_year, "de" | "del") {
            return None;
        }
        let day: u32 = day.parse().ok()?;
        let month = SPANISH_MONTHS
            .iter()
            .find(|(name, _)| name == month)
            .map(|(_, number)| *number)?;
        let year: i32 = year.parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Normalises a stored date value into a calendar date.
pub fn normalize_date(raw: &RawDate) -> Option<NaiveDate> {
    match raw {
        RawDate::Text(text) => parse_date_lenient(text),
        RawDate::Serial(serial) => date_from_excel_serial(*serial),
    }
}
