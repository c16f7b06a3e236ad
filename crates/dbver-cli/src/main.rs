//! dbver CLI - applies versioned SQL directories to a database in order

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;

use cli::{Cli, Commands, GlobalArgs};
use commands::{common, history, migrate, status};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(common::exit_code(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        None | Some(Commands::Migrate) => migrate::execute(&cli.global),
        Some(Commands::Status(args)) => status::execute(args, &cli.global),
        Some(Commands::History(args)) => history::execute(args, &cli.global),
    }
}

/// Install the env_logger backend. `RUST_LOG` wins over `--verbose`.
fn init_logging(global: &GlobalArgs) {
    let default_level = if global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
