//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// dbver - apply versioned SQL directories to a database in order
#[derive(Parser, Debug)]
#[command(name = "dbver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute (default: migrate)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global arguments available to all commands
///
/// Unset values fall back to the config file, then to built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database server host [default: 127.0.0.1]
    #[arg(long, global = true, env = "DBVER_SERVER")]
    pub server: Option<String>,

    /// Database server port [default: 3306]
    #[arg(long, global = true, env = "DBVER_PORT")]
    pub port: Option<u16>,

    /// Database name (required)
    #[arg(long, global = true, env = "DBVER_NAME")]
    pub name: Option<String>,

    /// Database username [default: root]
    #[arg(long, global = true, env = "DBVER_USER")]
    pub user: Option<String>,

    /// Database password (required)
    #[arg(long, global = true, env = "DBVER_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Root directory holding ver<N> directories [default: ./sql]
    #[arg(long = "sql", global = true, env = "DBVER_SQL")]
    pub sql_path: Option<PathBuf>,

    /// Config file path [default: ./dbver.yml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Version table name, optionally schema-qualified [default: dbVer]
    #[arg(long, global = true)]
    pub version_table: Option<String>,

    /// Fail on version directories whose name is not ver<N>
    #[arg(long, global = true)]
    pub strict: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply all pending versions (the default)
    Migrate,

    /// Show the current version and pending versions
    Status(StatusArgs),

    /// List applied versions
    History(HistoryArgs),
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Arguments for the history command
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
