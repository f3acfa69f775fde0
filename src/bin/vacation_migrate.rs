//! `vacation-migrate`: loads vacation balances from the HR spreadsheet into
//! the period table.
//!
//! Configuration is read from `config/migration.yaml` or the file named by
//! `VACATION_MIGRATION_CONFIG`; see [`ConfigLoader::from_env`].

use std::process::ExitCode;

use chrono::Local;
use tracing::{error, info};

use vacation_migration::config::ConfigLoader;
use vacation_migration::error::MigrationResult;
use vacation_migration::logging::init_tracing;
use vacation_migration::migration::{MigrationSummary, RunContext, VacationMigrator};
use vacation_migration::source::{extract_rows, read_table};
use vacation_migration::store::open_store;

fn main() -> ExitCode {
    // RUST_LOG may come from .env
    let _ = dotenv::dotenv();
    init_tracing();

    match run() {
        Ok(summary) => {
            println!("{}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Migration aborted");
            eprintln!("Migration aborted: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> MigrationResult<MigrationSummary> {
    let config = ConfigLoader::from_env()?.into_config();
    let context = RunContext::new(Local::now().naive_local());

    info!(
        run_id = %context.run_id,
        input = %config.input.path.display(),
        database = %config.database.path.display(),
        "Configuration loaded"
    );

    // Column problems abort before the database is opened.
    let table = read_table(&config.input.path, config.input.sheet.as_deref())?;
    let sheet = extract_rows(&table, &config.input.columns)?;
    info!(
        run_id = %context.run_id,
        rows_read = sheet.total_rows,
        valid_rows = sheet.rows.len(),
        "Spreadsheet read"
    );

    let mut conn = open_store(&config.database.path)?;
    VacationMigrator::from_config(&config, context).run(&mut conn, &sheet)
}
