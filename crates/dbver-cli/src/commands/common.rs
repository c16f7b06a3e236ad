//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use clap::CommandFactory;
use dbver_core::{Config, CoreError};
use dbver_migrate::{ErrorKind, MigrateError};
use std::path::Path;

use crate::cli::{Cli, GlobalArgs};

/// Load configuration and layer the global flags over it.
///
/// An explicit `--config` must exist; otherwise `dbver.yml` in the working
/// directory is used when present.
pub(crate) fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::load_from_dir_or_default(Path::new("."))
            .context("Failed to load dbver.yml")?,
    };
    apply_overrides(&mut config, global);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Overwrite config values with any flag (or environment variable) that was
/// set.
pub(crate) fn apply_overrides(config: &mut Config, global: &GlobalArgs) {
    let db = &mut config.database;
    if let Some(server) = &global.server {
        db.server = server.clone();
    }
    if let Some(port) = global.port {
        db.port = port;
    }
    if let Some(name) = &global.name {
        db.name = Some(name.clone());
    }
    if let Some(user) = &global.user {
        db.user = user.clone();
    }
    if let Some(password) = &global.password {
        db.password = Some(password.clone());
    }
    if let Some(sql_path) = &global.sql_path {
        config.sql_path = sql_path.clone();
    }
    if let Some(table) = &global.version_table {
        config.version_table = table.clone();
    }
    if global.strict {
        config.strict = true;
    }
}

/// Load configuration for a command that talks to the database.
///
/// Returns `None` after printing usage when the database name or password
/// is missing; that case is not an error.
pub(crate) fn load_connectable_config(global: &GlobalArgs) -> Result<Option<Config>> {
    let config = load_config(global)?;
    let missing = config.database.missing_required();
    if missing.is_empty() {
        return Ok(Some(config));
    }

    eprintln!("Missing required setting(s): {}\n", missing.join(", "));
    Cli::command()
        .print_help()
        .context("Failed to print usage")?;
    Ok(None)
}

/// Map an error chain to a process exit code.
///
/// Config 2, Path 3, Connectivity 4, Store 5, Discovery 6, Apply 7, other 1.
pub(crate) fn exit_code(err: &anyhow::Error) -> u8 {
    match error_kind(err) {
        Some(ErrorKind::Config) => 2,
        Some(ErrorKind::Path) => 3,
        Some(ErrorKind::Connectivity) => 4,
        Some(ErrorKind::Store) => 5,
        Some(ErrorKind::Discovery) => 6,
        Some(ErrorKind::Apply) => 7,
        None => 1,
    }
}

fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.chain().find_map(|cause| {
        if let Some(migrate) = cause.downcast_ref::<MigrateError>() {
            Some(migrate.kind())
        } else {
            cause.downcast_ref::<CoreError>().map(ErrorKind::of_core)
        }
    })
}

/// Calculate column widths for table output.
pub(crate) fn calculate_column_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.len());
        }
    }
    widths
}

/// Print a formatted table to stdout.
///
/// Left-aligned header row, a separator line of dashes, then each data row.
/// Columns are separated by two spaces.
pub(crate) fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    let widths = calculate_column_widths(headers, rows);

    let header_parts: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, &w)| format!("{:<width$}", h, width = w))
        .collect();
    println!("{}", header_parts.join("  ").trim_end());

    let sep_parts: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    println!("{}", sep_parts.join("  "));

    for row in rows {
        let row_parts: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<width$}", cell, width = w))
            .collect();
        println!("{}", row_parts.join("  ").trim_end());
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod tests;
