//! One-off import from a local sheet export.

use std::path::Path;

use sqlx::SqlitePool;

use sidesheet_core::{extract_events, tokenize_auto};

use crate::commands::store_extraction;
use crate::error::CliResult;

/// Reads a CSV/TSV export from disk and imports it.
pub async fn run(pool: &SqlitePool, file: &Path) -> CliResult<usize> {
    let text = std::fs::read_to_string(file)?;
    let rows = tokenize_auto(&text)?;
    let extraction = extract_events(&rows);
    store_extraction(pool, extraction).await
}
