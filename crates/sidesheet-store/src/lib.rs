//! SQLite persistence for imported side events.
//!
//! Import runs use full-replace semantics: the previous event set is
//! deleted and the freshly extracted, deduplicated set is inserted in one
//! transaction, batched to bound per-statement payload size. Records are
//! keyed by the id derived from the `event_date|event_name|start_time`
//! natural key, with a unique index on the same triple backing it up.

pub mod error;
pub mod record;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use record::{EventRecord, dedup_first_wins, now_unix, records_for_import};
pub use store::{
    DEFAULT_LIST_LIMIT, ListFilter, connect, events_with_registration_url, init_schema, list,
    replace_all, set_image_url,
};
