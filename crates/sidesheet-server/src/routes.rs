//! Router assembly.

use std::sync::Arc;

use axum::http::{Method, header};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{AppState, import_events_handler, list_events_handler};
use crate::upload::upload_page_handler;

/// Builds the service router.
///
/// Routes:
/// - `GET  /api/events`        - list imported events
/// - `POST /api/events/import` - import from an upload or the configured sheet
/// - `GET  /upload`            - manual upload page
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/api/events", get(list_events_handler))
        .route("/api/events/import", post(import_events_handler))
        .route("/upload", get(upload_page_handler))
        .with_state(state)
        .layer(cors)
}
