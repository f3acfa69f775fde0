//! Accrual logic for the vacation migration.
//!
//! This module contains the date utilities used to build anniversary dates
//! and normalise stored dates, the maturity gate deciding which year is the
//! newest one that can be credited, the backward period generator, and the
//! negative balance adjustment.

mod adjustment;
mod dates;
mod generator;
mod maturity;

pub use adjustment::negative_balance_adjustment;
pub use dates::{
    anniversary_in, anniversary_on_or_before, date_from_excel_serial, normalize_date,
    parse_date_lenient, safe_date,
};
pub use generator::{generate_periods, plan_for_employee};
pub use maturity::{current_period_matured, first_acquisition_year};
