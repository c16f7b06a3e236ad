//! Migrate command implementation

use anyhow::Result;
use dbver_migrate::{MigrationReport, Migrator};

use crate::cli::GlobalArgs;
use crate::commands::common::load_connectable_config;

/// Execute the migrate command
pub(crate) fn execute(global: &GlobalArgs) -> Result<()> {
    let Some(config) = load_connectable_config(global)? else {
        return Ok(());
    };
    log::debug!("Resolved configuration: {config:?}");

    // Path problems surface before any connection is attempted.
    let migrator = Migrator::from_config(&config)?;

    if global.verbose {
        println!("Database: {}", config.database.redacted_dsn());
        println!("SQL path: {}", migrator.sql_root().display());
    }

    let report = migrator.connect_and_run(&config.database)?;
    print_report(&report);
    Ok(())
}

fn print_report(report: &MigrationReport) {
    println!("Version before run: {}", report.from);

    for applied in &report.applied {
        println!(
            "  Applied version {} ({} file{}, {}ms)",
            applied.version,
            applied.files.len(),
            if applied.files.len() == 1 { "" } else { "s" },
            applied.elapsed.as_millis()
        );
    }

    if !report.skipped_invalid.is_empty() {
        println!(
            "  Skipped {} director{} with an invalid version name",
            report.skipped_invalid.len(),
            if report.skipped_invalid.len() == 1 { "y" } else { "ies" }
        );
    }

    println!();
    if report.is_up_to_date() {
        println!("Database is up to date at version {}", report.to);
    } else {
        println!(
            "Migrated from version {} to {} ({} version{} applied)",
            report.from,
            report.to,
            report.applied.len(),
            if report.applied.len() == 1 { "" } else { "s" }
        );
    }
}
