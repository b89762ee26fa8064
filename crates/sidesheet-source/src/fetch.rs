//! HTTP fetching of the side-event sheet.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use sidesheet_core::{Extraction, extract_events, tokenize_auto};

use crate::config::SheetSource;
use crate::error::{SourceError, SourceResult};

/// Base URL for the spreadsheet values API.
const VALUES_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Column range covering the seven meaningful sheet columns.
const VALUES_RANGE: &str = "A:G";

/// Default timeout for sheet fetches.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Response shape of the values API.
#[derive(Debug, Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

/// HTTP client for fetching the sheet.
#[derive(Debug)]
pub struct SheetClient {
    http_client: reqwest::Client,
}

impl Default for SheetClient {
    fn default() -> Self {
        Self::new(FETCH_TIMEOUT)
    }
}

impl SheetClient {
    /// Creates a new sheet client with the given request timeout.
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self { http_client }
    }

    /// Fetches the configured source and returns its rows of cells.
    pub async fn fetch_rows(&self, source: &SheetSource) -> SourceResult<Vec<Vec<String>>> {
        match source {
            SheetSource::CsvUrl(url) => self.fetch_csv(url).await,
            SheetSource::ValuesApi { api_key, sheet_id } => {
                self.fetch_values(api_key, sheet_id).await
            }
        }
    }

    /// Fetches the configured source and runs the extractor over it.
    pub async fn fetch_extraction(&self, source: &SheetSource) -> SourceResult<Extraction> {
        let rows = self.fetch_rows(source).await?;
        Ok(extract_events(&rows))
    }

    /// Fetches a published-CSV export and tokenizes it.
    async fn fetch_csv(&self, url: &str) -> SourceResult<Vec<Vec<String>>> {
        let response = self
            .http_client
            .get(url)
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::CsvStatus { status });
        }

        let text = response.text().await?;
        let rows = tokenize_auto(&text)?;
        debug!(rows = rows.len(), "fetched sheet as CSV");
        Ok(rows)
    }

    /// Fetches the sheet through the values API.
    async fn fetch_values(&self, api_key: &str, sheet_id: &str) -> SourceResult<Vec<Vec<String>>> {
        let url = format!(
            "{}/{}/values/{}",
            VALUES_API_BASE,
            urlencoding::encode(sheet_id),
            VALUES_RANGE
        );

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::ApiStatus { status, body });
        }

        let parsed: ValuesResponse = response.json().await?;
        debug!(rows = parsed.values.len(), "fetched sheet via values API");
        Ok(parsed.values)
    }
}
