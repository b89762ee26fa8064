//! sidesheet CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;

use sidesheet_cli::cli::{Cli, Command};
use sidesheet_cli::commands;
use sidesheet_cli::error::CliResult;
use sidesheet_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let tracing_config = if cli.debug {
        TracingConfig::cli_debug()
    } else {
        TracingConfig::default().with_level(Level::WARN)
    };

    match run(cli, tracing_config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, tracing_config: TracingConfig) -> CliResult<()> {
    init_tracing(tracing_config)?;

    let pool = sidesheet_store::connect(&cli.database).await?;
    sidesheet_store::init_schema(&pool).await?;

    match cli.command {
        Command::Import { file } => {
            commands::import::run(&pool, &file).await?;
        }
        Command::Fetch => {
            commands::fetch::run(&pool).await?;
        }
        Command::ScrapeImages => {
            commands::scrape::run(&pool).await?;
        }
    }

    Ok(())
}
