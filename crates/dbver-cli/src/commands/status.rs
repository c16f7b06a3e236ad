//! Status command implementation

use anyhow::{Context, Result};
use dbver_migrate::{connect, Migrator, StatusReport};

use crate::cli::{GlobalArgs, OutputFormat, StatusArgs};
use crate::commands::common::{self, load_connectable_config};

/// Execute the status command
pub(crate) fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let Some(config) = load_connectable_config(global)? else {
        return Ok(());
    };

    let migrator = Migrator::from_config(&config)?;
    let db = connect(&config.database)?;
    let status = migrator.status(&db)?;

    match args.output {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&status)
                .context("Failed to serialize status")?;
            println!("{output}");
        }
        OutputFormat::Table => print_status(&status, &migrator),
    }
    Ok(())
}

fn print_status(status: &StatusReport, migrator: &Migrator) {
    match status.current {
        Some(version) => println!("Current version: {version}"),
        None => println!(
            "Current version: (version table {} not created yet)",
            migrator.store().table()
        ),
    }

    if status.pending.is_empty() {
        println!("No pending versions");
    } else {
        println!("Pending versions ({}):\n", status.pending.len());
        let rows: Vec<Vec<String>> = status
            .pending
            .iter()
            .map(|p| vec![p.version.to_string(), p.path.display().to_string()])
            .collect();
        common::print_table(&["VERSION", "PATH"], &rows);
    }

    if !status.invalid.is_empty() {
        println!("\nIgnored directories (name is not ver<N>):");
        for path in &status.invalid {
            println!("  {}", path.display());
        }
    }
}
