//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the migration
//! configuration from a YAML file and applying environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MigrationError, MigrationResult};

use super::types::{AccrualRules, ColumnMapping, MigrationConfig};

/// Configuration file read when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/migration.yaml";

/// Environment variable naming an alternative configuration file.
pub const CONFIG_PATH_VAR: &str = "VACATION_MIGRATION_CONFIG";

/// Environment variable overriding `database.path`.
pub const DB_PATH_VAR: &str = "VACATION_DB_PATH";

/// Environment variable overriding `input.path`.
pub const INPUT_PATH_VAR: &str = "VACATION_INPUT_PATH";

/// Loads and provides access to the migration configuration.
///
/// # Example
///
/// ```no_run
/// use vacation_migration::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/migration.yaml")?;
/// println!("Reading {}", loader.config().input.path.display());
/// # Ok::<(), vacation_migration::error::MigrationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: MigrationConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML or misses a required field
    /// - The values are unusable (no identifier column, zero day cap)
    pub fn load<P: AsRef<Path>>(path: P) -> MigrationResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| MigrationError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: MigrationConfig =
            serde_yaml::from_str(&content).map_err(|e| MigrationError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Loads configuration the way the executable does.
    ///
    /// Picks the file named by [`CONFIG_PATH_VAR`] or [`DEFAULT_CONFIG_PATH`],
    /// then applies the [`DB_PATH_VAR`] and [`INPUT_PATH_VAR`] overrides.
    /// Only the process environment is consulted; callers that keep these
    /// variables in `.env` load it first.
    pub fn from_env() -> MigrationResult<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut loader = Self::load(path)?;
        loader.apply_overrides(|name| std::env::var(name).ok());
        Ok(loader)
    }

    /// Applies path overrides from a variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup(DB_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            self.config.database.path = PathBuf::from(db_path);
        }
        if let Some(input_path) = lookup(INPUT_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            self.config.input.path = PathBuf::from(input_path);
        }
    }

    fn validate(config: &MigrationConfig) -> MigrationResult<()> {
        let columns = &config.input.columns;
        if columns.employee_number.is_none() && columns.national_id.is_none() {
            return Err(MigrationError::InvalidConfig {
                message: "either input.columns.employee_number or input.columns.national_id \
                          must be set"
                    .to_string(),
            });
        }
        if config.accrual.max_days_per_period == 0 {
            return Err(MigrationError::InvalidConfig {
                message: "accrual.max_days_per_period must be greater than zero".to_string(),
            });
        }
        if config.run.created_by.trim().is_empty() {
            return Err(MigrationError::InvalidConfig {
                message: "run.created_by must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Returns the accrual rules.
    pub fn accrual(&self) -> &AccrualRules {
        &self.config.accrual
    }

    /// Returns the spreadsheet column mapping.
    pub fn columns(&self) -> &ColumnMapping {
        &self.config.input.columns
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> MigrationConfig {
        self.config
    }
}
