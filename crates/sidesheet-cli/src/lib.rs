//! CLI: one-off sheet imports and registration-image scraping.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use error::{CliError, CliResult};
