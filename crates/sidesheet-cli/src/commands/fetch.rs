//! Fetch the configured sheet source and import it.

use sqlx::SqlitePool;

use sidesheet_source::{SheetClient, SheetSource};

use crate::commands::store_extraction;
use crate::error::CliResult;

/// Fetches the configured source and imports the extracted events.
pub async fn run(pool: &SqlitePool) -> CliResult<usize> {
    let source = SheetSource::from_env()?;
    println!("Fetching sheet ({})", source.label());

    let client = SheetClient::default();
    let extraction = client.fetch_extraction(&source).await?;
    store_extraction(pool, extraction).await
}
