//! HTTP service: event listing, sheet import, upload page.
//!
//! Three routes around the store and the sheet source:
//! - `GET /api/events` - list imported events, optionally filtered by date
//! - `POST /api/events/import` - import from an uploaded export or the
//!   configured sheet source
//! - `GET /upload` - a manual upload page for the exported sheet file

mod config;
mod error;
mod handlers;
mod routes;
mod upload;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handlers::{AppState, ImportResponse, ListQuery, ListResponse};
pub use routes::build_router;
