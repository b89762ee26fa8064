//! Event types for imported side events.
//!
//! This module provides the core output type of the sheet extractor:
//! - [`ParsedEvent`]: one normalized side-event row from the source sheet
//! - [`event_id`]: the stable identity derived from an event's natural key

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Length of the hex id stored as a record's primary key.
const EVENT_ID_LEN: usize = 36;

/// A normalized side event extracted from one sheet row.
///
/// This is the canonical representation of an event after extraction and
/// before persistence. Times are kept verbatim as they appeared in the
/// sheet (`"6:00 pm"`, `"Feb 12-26"`), only the date is parsed into a
/// calendar value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedEvent {
    /// The calendar date the event starts on.
    pub event_date: NaiveDate,
    /// The start time token as it appeared in the sheet (not normalized).
    pub start_time: String,
    /// The end time token, if the sheet provided one.
    pub end_time: Option<String>,
    /// The event display name.
    pub event_name: String,
    /// The organizing entity, if listed.
    pub organizer: Option<String>,
    /// The venue, if listed.
    pub venue: Option<String>,
    /// Registration link or free-text registration hint.
    pub registration_url: Option<String>,
    /// Free-text notes; never URL-shaped.
    pub notes: Option<String>,
}

impl ParsedEvent {
    /// Creates a new event with the required fields.
    pub fn new(
        event_date: NaiveDate,
        start_time: impl Into<String>,
        event_name: impl Into<String>,
    ) -> Self {
        Self {
            event_date,
            start_time: start_time.into(),
            end_time: None,
            event_name: event_name.into(),
            organizer: None,
            venue: None,
            registration_url: None,
            notes: None,
        }
    }

    /// Builder method to set the end time.
    pub fn with_end_time(mut self, end_time: impl Into<String>) -> Self {
        self.end_time = Some(end_time.into());
        self
    }

    /// Builder method to set the organizer.
    pub fn with_organizer(mut self, organizer: impl Into<String>) -> Self {
        self.organizer = Some(organizer.into());
        self
    }

    /// Builder method to set the venue.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    /// Builder method to set the registration URL.
    pub fn with_registration_url(mut self, url: impl Into<String>) -> Self {
        self.registration_url = Some(url.into());
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Returns the natural key used for deduplication and identity.
    ///
    /// Two sheet rows describing the same event on the same date at the
    /// same start time collapse to one record downstream.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}|{}", self.event_date, self.event_name, self.start_time)
    }
}

/// Derives the stable id for an event.
///
/// The id is the SHA-256 digest of the pipe-joined
/// `event_date|event_name|start_time` triple, truncated to a 36-char hex
/// prefix. It doubles as the persisted primary key.
pub fn event_id(event: &ParsedEvent) -> String {
    let mut hasher = Sha256::new();
    hasher.update(event.dedup_key().as_bytes());
    let hex: String = hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    hex[..EVENT_ID_LEN].to_string()
}
