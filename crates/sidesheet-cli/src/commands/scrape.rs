//! Scrape Open Graph images for stored registration URLs.

use std::time::Duration;

use sqlx::SqlitePool;

use sidesheet_source::OgImageClient;
use sidesheet_store::{events_with_registration_url, set_image_url};

use crate::error::CliResult;

/// Pause between page fetches, to stay polite to registration hosts.
const SCRAPE_PACING: Duration = Duration::from_millis(500);

/// Display cap for scraped image URLs in progress output.
const URL_DISPLAY_LEN: usize = 60;

/// Visits every stored registration URL and records its `og:image`.
///
/// Pages without the tag (or that fail to load) are reported and left
/// untouched. Returns the number of events updated.
pub async fn run(pool: &SqlitePool) -> CliResult<usize> {
    let targets = events_with_registration_url(pool).await?;
    println!("Found {} events with registration URLs", targets.len());

    let client = OgImageClient::default();
    let mut updated = 0;

    for (index, (id, url)) in targets.iter().enumerate() {
        print!("[{}/{}] {}... ", index + 1, targets.len(), id);
        match client.fetch_og_image(url).await {
            Some(image_url) => {
                set_image_url(pool, id, &image_url).await?;
                println!("{}", ellipsize(&image_url, URL_DISPLAY_LEN));
                updated += 1;
            }
            None => println!("(no og:image)"),
        }
        tokio::time::sleep(SCRAPE_PACING).await;
    }

    println!("\nDone. Updated {updated} events with images.");
    Ok(updated)
}

/// Truncates long URLs for single-line progress output.
fn ellipsize(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}...", &s[..idx]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_urls_pass_through() {
        assert_eq!(ellipsize("https://img.example/a.png", 60), "https://img.example/a.png");
    }

    #[test]
    fn long_urls_are_truncated() {
        let long = format!("https://img.example/{}", "a".repeat(100));
        let shown = ellipsize(&long, 60);
        assert_eq!(shown.len(), 63);
        assert!(shown.ends_with("..."));
    }
}
