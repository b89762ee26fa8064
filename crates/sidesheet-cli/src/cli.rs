//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sidesheet - import and maintain the side-event listing
#[derive(Debug, Parser)]
#[command(name = "sidesheet")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database
    #[arg(long, env = "SIDESHEET_DB", default_value = "sidesheet.db")]
    pub database: String,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import events from a local CSV/TSV sheet export
    Import {
        /// Path to the exported sheet file
        file: PathBuf,
    },

    /// Fetch the configured sheet source and import it
    Fetch,

    /// Scrape Open Graph images from stored registration URLs
    ScrapeImages,
}
