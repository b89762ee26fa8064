//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying database failure (connect, query, transaction).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
