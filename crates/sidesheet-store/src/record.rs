//! Stored event records and their derivation from parsed events.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use sidesheet_core::{ParsedEvent, event_id};

/// One persisted side event.
///
/// Mirrors [`ParsedEvent`] plus the derived id, the scraped display image,
/// and bookkeeping timestamps (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub event_date: NaiveDate,
    pub start_time: String,
    pub end_time: Option<String>,
    pub event_name: String,
    pub organizer: Option<String>,
    pub venue: Option<String>,
    pub registration_url: Option<String>,
    /// Open Graph image scraped from the registration URL.
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl EventRecord {
    /// Builds a record from a parsed event, deriving its id and stamping
    /// both timestamps with `now`.
    pub fn from_parsed(event: &ParsedEvent, now: i64) -> Self {
        Self {
            id: event_id(event),
            event_date: event.event_date,
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            event_name: event.event_name.clone(),
            organizer: event.organizer.clone(),
            venue: event.venue.clone(),
            registration_url: event.registration_url.clone(),
            image_url: None,
            notes: event.notes.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Drops later duplicates of the `event_date|event_name|start_time` key.
///
/// The sheet occasionally lists the same event twice; the first occurrence
/// wins, matching the unique index the insert would otherwise trip over.
pub fn dedup_first_wins(events: Vec<ParsedEvent>) -> Vec<ParsedEvent> {
    let mut seen = HashSet::new();
    events
        .into_iter()
        .filter(|event| seen.insert(event.dedup_key()))
        .collect()
}

/// Prepares parsed events for an import run: dedup, derive ids, stamp
/// timestamps.
pub fn records_for_import(events: Vec<ParsedEvent>, now: i64) -> Vec<EventRecord> {
    dedup_first_wins(events)
        .iter()
        .map(|event| EventRecord::from_parsed(event, now))
        .collect()
}

/// Current unix time in seconds.
pub fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
