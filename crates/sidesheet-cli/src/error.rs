//! CLI error types.

use std::io;
use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while running a CLI command.
#[derive(Debug, Error)]
pub enum CliError {
    /// IO error (reading the export file).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export file could not be split into rows.
    #[error(transparent)]
    Tokenize(#[from] sidesheet_core::TokenizeError),

    /// Sheet fetching failed or is unconfigured.
    #[error(transparent)]
    Source(#[from] sidesheet_source::SourceError),

    /// Database failure.
    #[error(transparent)]
    Store(#[from] sidesheet_store::StoreError),

    /// Tracing initialization failure.
    #[error(transparent)]
    Tracing(#[from] sidesheet_core::TracingError),
}
