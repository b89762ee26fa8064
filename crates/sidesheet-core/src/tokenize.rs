//! Delimited-text tokenization for sheet exports.
//!
//! The sheet arrives either as a comma-separated published CSV or as a
//! tab-separated clipboard/file export. The delimiter is auto-detected
//! from the first line, and the [`csv`] crate handles quoting and ragged
//! rows; the extractor downstream treats missing trailing cells as empty.

use csv::{ReaderBuilder, Trim};
use thiserror::Error;

/// Result type for tokenization.
pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// Errors that can occur while splitting delimited text into rows.
#[derive(Debug, Error)]
pub enum TokenizeError {
    /// The underlying reader rejected the input (e.g. broken quoting).
    #[error("failed to read delimited text: {0}")]
    Malformed(#[from] csv::Error),
}

/// The cell delimiter of a sheet export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Returns the delimiter byte for the reader.
    pub fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// Detects the delimiter by counting tabs vs commas on the first line.
///
/// Tabs win only when strictly more frequent; a tie (including an empty
/// first line) falls back to comma.
pub fn detect_delimiter(text: &str) -> Delimiter {
    let first_line = text.lines().next().unwrap_or("");
    let tabs = first_line.matches('\t').count();
    let commas = first_line.matches(',').count();
    if tabs > commas {
        Delimiter::Tab
    } else {
        Delimiter::Comma
    }
}

/// Splits delimited text into rows of trimmed cells.
///
/// Rows may be ragged; empty lines are dropped. No row is interpreted as
/// a header here, the extractor skips the sheet's leading rows itself.
pub fn tokenize(text: &str, delimiter: Delimiter) -> TokenizeResult<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Tokenizes with the delimiter detected from the text itself.
pub fn tokenize_auto(text: &str) -> TokenizeResult<Vec<Vec<String>>> {
    tokenize(text, detect_delimiter(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    mod delimiter_detection {
        use super::*;

        #[test]
        fn commas_by_default() {
            assert_eq!(detect_delimiter("a,b,c\nd,e,f"), Delimiter::Comma);
            assert_eq!(detect_delimiter(""), Delimiter::Comma);
        }

        #[test]
        fn tabs_when_strictly_more_frequent() {
            assert_eq!(detect_delimiter("a\tb\tc\nd\te\tf"), Delimiter::Tab);
        }

        #[test]
        fn tie_falls_back_to_comma() {
            assert_eq!(detect_delimiter("a,b\tc"), Delimiter::Comma);
        }

        #[test]
        fn only_first_line_counts() {
            // Later lines are tab-heavy but the first line decides.
            assert_eq!(detect_delimiter("a,b\nc\td\te\tf"), Delimiter::Comma);
        }
    }

    mod tokenizing {
        use super::*;

        #[test]
        fn splits_csv_rows() {
            let rows = tokenize("a,b,c\nd,e,f", Delimiter::Comma).unwrap();
            assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
        }

        #[test]
        fn splits_tsv_rows() {
            let rows = tokenize("a\tb\nc\td", Delimiter::Tab).unwrap();
            assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
        }

        #[test]
        fn ragged_rows_are_preserved() {
            let rows = tokenize("a,b,c\nd\ne,f", Delimiter::Comma).unwrap();
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[1], vec!["d"]);
        }

        #[test]
        fn quoted_cells_keep_embedded_delimiters() {
            let rows = tokenize("\"Mixer, the sequel\",6:00 pm", Delimiter::Comma).unwrap();
            assert_eq!(rows[0][0], "Mixer, the sequel");
        }

        #[test]
        fn cells_are_trimmed() {
            let rows = tokenize(" a , b ", Delimiter::Comma).unwrap();
            assert_eq!(rows[0], vec!["a", "b"]);
        }

        #[test]
        fn auto_detects_tabs() {
            let rows = tokenize_auto("a\tb\tc\nd\te\tf").unwrap();
            assert_eq!(rows[0], vec!["a", "b", "c"]);
        }

        #[test]
        fn crlf_line_endings() {
            let rows = tokenize("a,b\r\nc,d\r\n", Delimiter::Comma).unwrap();
            assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
        }
    }
}
