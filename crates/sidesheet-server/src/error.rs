//! Server error types.

use std::io;
use thiserror::Error;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (bind, accept).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Store error (connect, schema bootstrap).
    #[error(transparent)]
    Store(#[from] sidesheet_store::StoreError),

    /// Tracing initialization failure.
    #[error(transparent)]
    Tracing(#[from] sidesheet_core::TracingError),

    /// Configuration error.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
