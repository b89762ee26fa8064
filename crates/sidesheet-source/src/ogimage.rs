//! Open Graph image scraping for registration pages.
//!
//! Registration URLs in the sheet usually point at event pages carrying an
//! `og:image` meta tag. After an import, the scraper visits each stored
//! registration URL and records that image for display.
//!
//! Scraping is best-effort throughout: a page without the tag, a fetch
//! failure, or an unparseable URL yields `None` rather than an error.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::debug;
use url::Url;

/// `og:image` meta tag, tolerating either attribute order.
static OG_IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)<meta[^>]+property=["']og:image["'][^>]+content=["']([^"']+)["']|content=["']([^"']+)["'][^>]+property=["']og:image["']"#,
    )
    .expect("valid og:image regex")
});

/// User agent sent to registration pages.
const SCRAPE_USER_AGENT: &str = "Mozilla/5.0 (compatible; SidesheetEventScraper/1.0)";

/// Timeout per page fetch.
const SCRAPE_TIMEOUT: Duration = Duration::from_secs(15);

/// Extracts the `og:image` content from an HTML document.
pub fn extract_og_image(html: &str) -> Option<String> {
    let caps = OG_IMAGE_RE.captures(html)?;
    let content = caps
        .get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().trim())
        .unwrap_or("");
    (!content.is_empty()).then(|| content.to_string())
}

/// Resolves a possibly-relative image URL against the page it came from.
pub fn resolve_image_url(image: &str, page_url: &str) -> Option<String> {
    if image.starts_with("http") {
        return Some(image.to_string());
    }
    let base = Url::parse(page_url).ok()?;
    base.join(image).ok().map(|u| u.to_string())
}

/// HTTP client for scraping registration pages.
#[derive(Debug)]
pub struct OgImageClient {
    http_client: reqwest::Client,
}

impl Default for OgImageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OgImageClient {
    /// Creates a new scraping client with redirects and a browser-ish UA.
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(SCRAPE_TIMEOUT)
            .user_agent(SCRAPE_USER_AGENT)
            .build()
            .expect("failed to create HTTP client");

        Self { http_client }
    }

    /// Fetches a registration page and returns its resolved `og:image`.
    ///
    /// Any failure along the way (network, status, missing tag) returns
    /// `None`; a single broken page must not stop a scrape pass.
    pub async fn fetch_og_image(&self, page_url: &str) -> Option<String> {
        let response = match self.http_client.get(page_url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(url = page_url, error = %err, "registration page fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(
                url = page_url,
                status = %response.status(),
                "registration page returned non-success status"
            );
            return None;
        }

        let html = response.text().await.ok()?;
        let image = extract_og_image(&html)?;
        resolve_image_url(&image, page_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod extraction {
        use super::*;

        #[test]
        fn property_before_content() {
            let html = r#"<meta property="og:image" content="https://img.example/a.png"/>"#;
            assert_eq!(
                extract_og_image(html),
                Some("https://img.example/a.png".to_string())
            );
        }

        #[test]
        fn content_before_property() {
            let html = r#"<meta content="https://img.example/b.png" property="og:image"/>"#;
            assert_eq!(
                extract_og_image(html),
                Some("https://img.example/b.png".to_string())
            );
        }

        #[test]
        fn single_quoted_attributes() {
            let html = r#"<meta property='og:image' content='https://img.example/c.png'>"#;
            assert_eq!(
                extract_og_image(html),
                Some("https://img.example/c.png".to_string())
            );
        }

        #[test]
        fn missing_tag_yields_none() {
            assert_eq!(extract_og_image("<html><head></head></html>"), None);
        }

        #[test]
        fn empty_content_yields_none() {
            let html = r#"<meta property="og:image" content=""/>"#;
            assert_eq!(extract_og_image(html), None);
        }

        #[test]
        fn surrounding_markup_is_ignored() {
            let html = r#"
                <html><head>
                <meta property="og:title" content="Mixer"/>
                <meta property="og:image" content="https://img.example/d.png"/>
                </head></html>
            "#;
            assert_eq!(
                extract_og_image(html),
                Some("https://img.example/d.png".to_string())
            );
        }
    }

    mod resolution {
        use super::*;

        #[test]
        fn absolute_urls_pass_through() {
            assert_eq!(
                resolve_image_url("https://img.example/a.png", "https://page.example/event"),
                Some("https://img.example/a.png".to_string())
            );
        }

        #[test]
        fn relative_paths_resolve_against_the_page() {
            assert_eq!(
                resolve_image_url("/img/a.png", "https://page.example/events/mixer"),
                Some("https://page.example/img/a.png".to_string())
            );
        }

        #[test]
        fn unparseable_base_yields_none() {
            assert_eq!(resolve_image_url("/img/a.png", "not a url"), None);
        }
    }
}
