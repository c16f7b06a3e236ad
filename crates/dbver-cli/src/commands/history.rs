//! History command implementation

use anyhow::{Context, Result};
use dbver_migrate::{connect, VersionStore};

use crate::cli::{GlobalArgs, HistoryArgs, OutputFormat};
use crate::commands::common::{self, load_connectable_config};

/// Execute the history command
pub(crate) fn execute(args: &HistoryArgs, global: &GlobalArgs) -> Result<()> {
    let Some(config) = load_connectable_config(global)? else {
        return Ok(());
    };

    let store = VersionStore::new(config.version_table()?);
    let db = connect(&config.database)?;

    if !store.exists(&db)? {
        println!("Version table {} has not been created yet", store.table());
        return Ok(());
    }
    let records = store.history(&db)?;

    match args.output {
        OutputFormat::Json => {
            let output = serde_json::to_string_pretty(&records)
                .context("Failed to serialize history")?;
            println!("{output}");
        }
        OutputFormat::Table => {
            let rows: Vec<Vec<String>> = records
                .iter()
                .map(|r| {
                    vec![
                        r.version.to_string(),
                        r.applied_at.clone().unwrap_or_else(|| "-".to_string()),
                    ]
                })
                .collect();
            common::print_table(&["VERSION", "APPLIED_AT"], &rows);
            println!("\n({} rows)", records.len());
        }
    }
    Ok(())
}
