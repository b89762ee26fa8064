//! Request handlers for the events API.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::{error, info};

use sidesheet_core::{Extraction, extract_events, tokenize_auto};
use sidesheet_source::{SheetClient, SheetSource};
use sidesheet_store::{EventRecord, ListFilter, now_unix, records_for_import};

/// Source label reported for body uploads.
const UPLOAD_SOURCE: &str = "upload";

/// Note reported when an import found no event rows.
const EMPTY_SHEET_NOTE: &str = "No event rows found in sheet.";

/// Application state shared across handlers.
#[derive(Debug)]
pub struct AppState {
    /// Database handle.
    pub pool: SqlitePool,
    /// Client for fetching the configured sheet source.
    pub sheet_client: SheetClient,
}

impl AppState {
    /// Creates new application state around a database pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            sheet_client: SheetClient::default(),
        }
    }
}

/// Query parameters of `GET /api/events`.
///
/// Paging values arrive as strings so that unparseable input degrades to
/// the defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// Exact event date (`YYYY-MM-DD`) to filter on.
    #[serde(default)]
    pub event_date: Option<String>,
    /// Page size, clamped server-side.
    #[serde(default)]
    pub limit: Option<String>,
    /// Rows to skip.
    #[serde(default)]
    pub offset: Option<String>,
}

/// Response body of `GET /api/events`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub events: Vec<EventRecord>,
}

/// Response body of `POST /api/events/import`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imported: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_errors: Option<Vec<String>>,
}

/// Generic error body for the listing endpoint.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// `GET /api/events` - lists imported events.
pub async fn list_events_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let mut filter = ListFilter::default();

    if let Some(raw) = query.event_date.as_deref().filter(|s| !s.is_empty()) {
        match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => filter.event_date = Some(date),
            Err(_) => {
                // A date no record can carry matches nothing; answer the
                // empty set rather than erroring on client input.
                return (StatusCode::OK, Json(ListResponse { events: Vec::new() }))
                    .into_response();
            }
        }
    }
    filter.limit = query.limit.as_deref().and_then(|s| s.parse().ok());
    filter.offset = query.offset.as_deref().and_then(|s| s.parse().ok());

    match sidesheet_store::list(&state.pool, &filter).await {
        Ok(events) => (StatusCode::OK, Json(ListResponse { events })).into_response(),
        Err(err) => {
            error!(error = %err, "event listing failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// `POST /api/events/import` - imports events into the store.
///
/// A non-empty request body is treated as an uploaded CSV/TSV export;
/// otherwise the configured sheet source is fetched. Either way the result
/// replaces the stored event set wholesale.
pub async fn import_events_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> impl IntoResponse {
    let (extraction, source_label) = if body.trim().is_empty() {
        match fetch_configured(&state).await {
            Ok(pair) => pair,
            Err(message) => {
                error!(error = %message, "sheet import failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ImportResponse {
                        ok: false,
                        error: Some(message),
                        ..Default::default()
                    }),
                );
            }
        }
    } else {
        match tokenize_auto(&body) {
            Ok(rows) => (extract_events(&rows), UPLOAD_SOURCE.to_string()),
            Err(err) => {
                error!(error = %err, "uploaded sheet could not be tokenized");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ImportResponse {
                        ok: false,
                        error: Some(err.to_string()),
                        ..Default::default()
                    }),
                );
            }
        }
    };

    if extraction.events.is_empty() {
        // Soft condition: an empty sheet is reportable, not an error.
        return (
            StatusCode::OK,
            Json(ImportResponse {
                ok: true,
                imported: Some(0),
                source: Some(source_label),
                parse_errors: Some(vec![EMPTY_SHEET_NOTE.to_string()]),
                ..Default::default()
            }),
        );
    }

    let skipped = extraction.skipped_rows;
    let records = records_for_import(extraction.events, now_unix());

    match sidesheet_store::replace_all(&state.pool, &records).await {
        Ok(imported) => {
            info!(imported, skipped, source = %source_label, "sheet import complete");
            (
                StatusCode::OK,
                Json(ImportResponse {
                    ok: true,
                    imported: Some(imported),
                    source: Some(source_label),
                    ..Default::default()
                }),
            )
        }
        Err(err) => {
            error!(error = %err, "storing imported events failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ImportResponse {
                    ok: false,
                    error: Some(err.to_string()),
                    ..Default::default()
                }),
            )
        }
    }
}

/// Resolves and fetches the configured sheet source.
///
/// The source is re-resolved from the environment per request, so fixing
/// the configuration does not require a restart.
async fn fetch_configured(state: &AppState) -> Result<(Extraction, String), String> {
    let source = SheetSource::from_env().map_err(|err| err.to_string())?;
    let extraction = state
        .sheet_client
        .fetch_extraction(&source)
        .await
        .map_err(|err| err.to_string())?;
    Ok((extraction, source.label().to_string()))
}
