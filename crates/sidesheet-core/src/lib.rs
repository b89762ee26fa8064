//! Core types: parsed events, sheet row extraction, event identity

pub mod event;
pub mod extract;
pub mod tokenize;
pub mod trace;

pub use event::{ParsedEvent, event_id};
pub use extract::{DATA_START_ROW, Extraction, SEASON_YEAR, extract_events};
pub use tokenize::{Delimiter, TokenizeError, detect_delimiter, tokenize, tokenize_auto};
pub use trace::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
