//! Sheet source configuration.

use crate::error::{SourceError, SourceResult};

/// Environment variable naming the published-CSV export URL.
pub const CSV_URL_VAR: &str = "SIDESHEET_CSV_URL";
/// Environment variable holding the values-API key.
pub const API_KEY_VAR: &str = "SIDESHEET_API_KEY";
/// Environment variable naming the spreadsheet the API key applies to.
pub const SHEET_ID_VAR: &str = "SIDESHEET_SHEET_ID";

/// Where the side-event sheet is fetched from.
///
/// A published CSV URL takes precedence over the values API when both are
/// configured; the CSV path needs no credentials and survives API quota
/// exhaustion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetSource {
    /// A sheet published to the web as CSV.
    CsvUrl(String),
    /// The spreadsheet values API, range `A:G`.
    ValuesApi { api_key: String, sheet_id: String },
}

impl SheetSource {
    /// Resolves the source from the process environment.
    pub fn from_env() -> SourceResult<Self> {
        Self::resolve(
            std::env::var(CSV_URL_VAR).ok(),
            std::env::var(API_KEY_VAR).ok(),
            std::env::var(SHEET_ID_VAR).ok(),
        )
    }

    /// Resolves the source from explicit values (empty strings count as
    /// unset).
    pub fn resolve(
        csv_url: Option<String>,
        api_key: Option<String>,
        sheet_id: Option<String>,
    ) -> SourceResult<Self> {
        if let Some(url) = csv_url.filter(|v| !v.trim().is_empty()) {
            return Ok(Self::CsvUrl(url));
        }
        match api_key.filter(|v| !v.trim().is_empty()) {
            Some(api_key) => match sheet_id.filter(|v| !v.trim().is_empty()) {
                Some(sheet_id) => Ok(Self::ValuesApi { api_key, sheet_id }),
                None => Err(SourceError::MissingSheetId),
            },
            None => Err(SourceError::NotConfigured),
        }
    }

    /// Returns the label reported alongside import results.
    pub fn label(&self) -> &'static str {
        match self {
            Self::CsvUrl(_) => "csv",
            Self::ValuesApi { .. } => "sheets_api",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_url_wins_over_api_key() {
        let source = SheetSource::resolve(
            Some("https://sheets.example/pub?output=csv".to_string()),
            Some("key".to_string()),
            Some("sheet".to_string()),
        )
        .unwrap();
        assert_eq!(
            source,
            SheetSource::CsvUrl("https://sheets.example/pub?output=csv".to_string())
        );
        assert_eq!(source.label(), "csv");
    }

    #[test]
    fn api_key_with_sheet_id() {
        let source =
            SheetSource::resolve(None, Some("key".to_string()), Some("sheet".to_string())).unwrap();
        assert_eq!(
            source,
            SheetSource::ValuesApi {
                api_key: "key".to_string(),
                sheet_id: "sheet".to_string(),
            }
        );
        assert_eq!(source.label(), "sheets_api");
    }

    #[test]
    fn api_key_without_sheet_id_errors() {
        let err = SheetSource::resolve(None, Some("key".to_string()), None).unwrap_err();
        assert!(matches!(err, SourceError::MissingSheetId));
    }

    #[test]
    fn nothing_configured_errors() {
        let err = SheetSource::resolve(None, None, None).unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let err = SheetSource::resolve(Some("  ".to_string()), Some("".to_string()), None)
            .unwrap_err();
        assert!(matches!(err, SourceError::NotConfigured));
    }
}
