//! Error types for sheet source operations.

use thiserror::Error;

/// A specialized Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while fetching or decoding the sheet.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Neither a CSV URL nor an API key is configured.
    #[error("no sheet source configured: set SIDESHEET_CSV_URL (publish the sheet as CSV) or SIDESHEET_API_KEY")]
    NotConfigured,

    /// An API key is configured without the spreadsheet it applies to.
    #[error("SIDESHEET_API_KEY is set but SIDESHEET_SHEET_ID is missing")]
    MissingSheetId,

    /// Network-level failure (connect, timeout, body read).
    #[error("network error fetching sheet: {0}")]
    Network(#[from] reqwest::Error),

    /// The CSV export URL answered with a non-success status.
    #[error("CSV fetch failed: {status}")]
    CsvStatus { status: reqwest::StatusCode },

    /// The values API answered with a non-success status.
    #[error("sheets API failed: {status} {body}")]
    ApiStatus {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The CSV body could not be split into rows.
    #[error(transparent)]
    Tokenize(#[from] sidesheet_core::TokenizeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_errors_name_the_env_vars() {
        let msg = SourceError::NotConfigured.to_string();
        assert!(msg.contains("SIDESHEET_CSV_URL"));
        assert!(msg.contains("SIDESHEET_API_KEY"));

        let msg = SourceError::MissingSheetId.to_string();
        assert!(msg.contains("SIDESHEET_SHEET_ID"));
    }

    #[test]
    fn status_errors_carry_the_status() {
        let err = SourceError::CsvStatus {
            status: reqwest::StatusCode::FORBIDDEN,
        };
        assert!(err.to_string().contains("403"));

        let err = SourceError::ApiStatus {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "key invalid".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("400"));
        assert!(msg.contains("key invalid"));
    }
}
