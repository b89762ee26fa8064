//! Command implementations.

pub mod fetch;
pub mod import;
pub mod scrape;

use sqlx::SqlitePool;

use sidesheet_core::Extraction;
use sidesheet_store::{now_unix, records_for_import, replace_all};

use crate::error::CliResult;

/// Stores an extraction result, replacing the previous event set.
///
/// Shared tail of the `import` and `fetch` commands. Returns the number of
/// rows written after deduplication.
pub(crate) async fn store_extraction(
    pool: &SqlitePool,
    extraction: Extraction,
) -> CliResult<usize> {
    println!(
        "Parsed {} events ({} rows skipped)",
        extraction.events.len(),
        extraction.skipped_rows
    );

    if extraction.events.is_empty() {
        println!("No event rows found in sheet; nothing imported.");
        return Ok(0);
    }

    let records = records_for_import(extraction.events, now_unix());
    let imported = replace_all(pool, &records).await?;
    println!("Imported {imported} events to database");
    Ok(imported)
}
