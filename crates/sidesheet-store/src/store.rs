//! Database operations over the events table.

use chrono::NaiveDate;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::info;

use crate::error::StoreResult;
use crate::record::EventRecord;

/// Maximum (and default) page size for event listings.
pub const DEFAULT_LIST_LIMIT: i64 = 500;

/// Rows per INSERT statement during an import run.
const INSERT_BATCH_SIZE: usize = 50;

/// Opens (creating if missing) the SQLite database at `path`.
pub async fn connect(path: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    Ok(pool)
}

/// Creates the events table and its natural-key index if absent.
pub async fn init_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS events (
            id TEXT PRIMARY KEY,
            event_date TEXT NOT NULL,
            start_time TEXT NOT NULL,
            end_time TEXT,
            event_name TEXT NOT NULL,
            organizer TEXT,
            venue TEXT,
            registration_url TEXT,
            image_url TEXT,
            notes TEXT,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE UNIQUE INDEX IF NOT EXISTS events_date_name_start
         ON events(event_date, event_name, start_time)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Replaces the whole event set in one transaction.
///
/// Inserts run in batches of [`INSERT_BATCH_SIZE`] rows to bound the size
/// of any single statement. Returns the number of rows inserted.
pub async fn replace_all(pool: &SqlitePool, records: &[EventRecord]) -> StoreResult<usize> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM events").execute(&mut *tx).await?;

    for batch in records.chunks(INSERT_BATCH_SIZE) {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO events (id, event_date, start_time, end_time, event_name, \
             organizer, venue, registration_url, image_url, notes, created_at, updated_at) ",
        );
        builder.push_values(batch, |mut row, record| {
            row.push_bind(&record.id)
                .push_bind(record.event_date)
                .push_bind(&record.start_time)
                .push_bind(&record.end_time)
                .push_bind(&record.event_name)
                .push_bind(&record.organizer)
                .push_bind(&record.venue)
                .push_bind(&record.registration_url)
                .push_bind(&record.image_url)
                .push_bind(&record.notes)
                .push_bind(record.created_at)
                .push_bind(record.updated_at);
        });
        builder.build().execute(&mut *tx).await?;
    }

    tx.commit().await?;

    info!(imported = records.len(), "replaced event set");
    Ok(records.len())
}

/// Listing filter: optional exact-date match plus paging.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    /// Only events on this date.
    pub event_date: Option<NaiveDate>,
    /// Page size; `None` or out-of-range values clamp to
    /// [`DEFAULT_LIST_LIMIT`].
    pub limit: Option<i64>,
    /// Rows to skip; negative values clamp to zero.
    pub offset: Option<i64>,
}

impl ListFilter {
    /// Builder method to filter on a date.
    pub fn with_event_date(mut self, date: NaiveDate) -> Self {
        self.event_date = Some(date);
        self
    }

    /// Builder method to set the page size.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Builder method to set the page offset.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    fn effective_limit(&self) -> i64 {
        match self.limit {
            Some(limit) if (1..=DEFAULT_LIST_LIMIT).contains(&limit) => limit,
            _ => DEFAULT_LIST_LIMIT,
        }
    }

    fn effective_offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Lists events ordered by `(event_date, start_time)`.
pub async fn list(pool: &SqlitePool, filter: &ListFilter) -> StoreResult<Vec<EventRecord>> {
    let limit = filter.effective_limit();
    let offset = filter.effective_offset();

    let records = match filter.event_date {
        Some(date) => {
            sqlx::query_as::<_, EventRecord>(
                "SELECT * FROM events WHERE event_date = ?
                 ORDER BY event_date, start_time LIMIT ? OFFSET ?",
            )
            .bind(date)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, EventRecord>(
                "SELECT * FROM events ORDER BY event_date, start_time LIMIT ? OFFSET ?",
            )
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(records)
}

/// Returns `(id, registration_url)` for events whose registration URL is
/// an actual HTTP(S) link (free-text registration hints are skipped).
pub async fn events_with_registration_url(
    pool: &SqlitePool,
) -> StoreResult<Vec<(String, String)>> {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT id, registration_url FROM events
         WHERE registration_url IS NOT NULL
         ORDER BY event_date, start_time",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter(|(_, url)| url.starts_with("http"))
        .collect())
}

/// Stores the scraped display image for one event.
pub async fn set_image_url(pool: &SqlitePool, id: &str, image_url: &str) -> StoreResult<()> {
    sqlx::query("UPDATE events SET image_url = ? WHERE id = ?")
        .bind(image_url)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
