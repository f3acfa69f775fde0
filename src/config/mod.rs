//! Configuration loading and management for the vacation migration.
//!
//! This module loads the migration settings from a YAML file: where the
//! spreadsheet lives and which columns to read, the record store path, the
//! audit tag and existing-period policy, and the accrual rules.
//!
//! # Example
//!
//! ```no_run
//! use vacation_migration::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/migration.yaml").unwrap();
//! println!("Cap per period: {}", loader.accrual().max_days_per_period);
//! ```

mod loader;
mod types;

pub use loader::{
    CONFIG_PATH_VAR, ConfigLoader, DB_PATH_VAR, DEFAULT_CONFIG_PATH, INPUT_PATH_VAR,
};
pub use types::{
    AccrualRules, ColumnMapping, DEFAULT_CREATED_BY, DatabaseConfig, ExistingPeriodPolicy,
    InputConfig, MigrationConfig, RunConfig,
};
