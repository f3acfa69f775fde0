//! Migration orchestration.
//!
//! [`VacationMigrator`] turns extracted sheet rows into stored vacation
//! periods and reports the run in a [`MigrationSummary`].

mod driver;
mod summary;

pub use driver::{RunContext, VacationMigrator, classify_error};
pub use summary::MigrationSummary;
