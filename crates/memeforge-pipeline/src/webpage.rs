// SPDX-FileCopyrightText: 2026 MemeForge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webpage fetching and text extraction.
//!
//! Fetches the page, renders the HTML to plain text, and truncates to
//! the configured character limit before the text reaches the LLM.

use std::time::Duration;

use memeforge_core::error::MemeForgeError;
use tracing::debug;

/// Rendering width passed to the HTML-to-text converter. Only affects
/// line wrapping, not which text survives extraction.
const TEXT_WIDTH: usize = 120;

/// HTTP fetcher producing truncated plain text for analysis prompts.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Creates a fetcher with a browser-ish user agent.
    pub fn new() -> Result<Self, MemeForgeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("memeforge/0.1")
            .build()
            .map_err(|e| MemeForgeError::Fetch {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(Self { client })
    }

    /// Fetch `url` and return at most `character_limit` characters of
    /// extracted text.
    pub async fn fetch_text(
        &self,
        url: &str,
        character_limit: usize,
    ) -> Result<String, MemeForgeError> {
        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| MemeForgeError::Fetch {
                    url: url.to_string(),
                    message: format!("request failed: {e}"),
                    source: Some(Box::new(e)),
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MemeForgeError::Fetch {
                url: url.to_string(),
                message: format!("page returned {status}"),
                source: None,
            });
        }

        let html = response.text().await.map_err(|e| MemeForgeError::Fetch {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
            source: Some(Box::new(e)),
        })?;

        let text = html2text::from_read(html.as_bytes(), TEXT_WIDTH).map_err(|e| {
            MemeForgeError::Fetch {
                url: url.to_string(),
                message: format!("text extraction failed: {e}"),
                source: Some(Box::new(e)),
            }
        })?;

        let truncated = truncate_chars(&text, character_limit);
        debug!(url, chars = truncated.chars().count(), "page text extracted");
        Ok(truncated)
    }
}

/// Take the first `limit` characters, respecting UTF-8 boundaries.
fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "päyröll säläry";
        let truncated = truncate_chars(text, 7);
        assert_eq!(truncated, "päyröll");
    }

    #[test]
    fn truncate_is_noop_for_short_text() {
        assert_eq!(truncate_chars("short", 6000), "short");
    }

    #[tokio::test]
    async fn fetch_extracts_text_from_html() {
        let server = MockServer::start().await;
        let html = "<html><body><h1>Acme Payroll</h1><p>Fast payouts for HR teams.</p></body></html>";

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let text = fetcher.fetch_text(&server.uri(), 6000).await.unwrap();
        assert!(text.contains("Acme Payroll"));
        assert!(text.contains("Fast payouts"));
        assert!(!text.contains("<h1>"));
    }

    #[tokio::test]
    async fn fetch_applies_character_limit() {
        let server = MockServer::start().await;
        let html = format!("<html><body>{}</body></html>", "x".repeat(10_000));

        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let text = fetcher.fetch_text(&server.uri(), 6000).await.unwrap();
        assert!(text.chars().count() <= 6000);
    }

    #[tokio::test]
    async fn non_success_status_is_a_fetch_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = PageFetcher::new().unwrap();
        let err = fetcher.fetch_text(&server.uri(), 6000).await.unwrap_err();
        assert!(matches!(err, MemeForgeError::Fetch { .. }));
    }
}
