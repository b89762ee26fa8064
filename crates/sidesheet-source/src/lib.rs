//! Sheet source: fetching the side-event listing and scraping event images.
//!
//! The listing is maintained in a spreadsheet and reaches us one of two
//! ways, resolved from the environment at startup:
//!
//! - a published-CSV export URL ([`SheetSource::CsvUrl`]), or
//! - the spreadsheet values API with an API key ([`SheetSource::ValuesApi`]).
//!
//! [`SheetClient`] fetches either into rows of cells and hands them to the
//! core extractor. [`OgImageClient`] visits registration pages after import
//! and pulls their Open Graph `og:image` for display.

pub mod config;
pub mod error;
pub mod fetch;
pub mod ogimage;

pub use config::SheetSource;
pub use error::{SourceError, SourceResult};
pub use fetch::SheetClient;
pub use ogimage::{OgImageClient, extract_og_image, resolve_image_url};
