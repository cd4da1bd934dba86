//! Best-effort page fetching for profile enrichment and website scraping.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use mentorscout_shared::{MentorScoutError, Result};

/// Browser-like User-Agent: profile pages serve richer previews to browsers
/// than to obvious bots.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

/// Default timeout in seconds for a single fetch.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// PageFetcher trait
// ---------------------------------------------------------------------------

/// A fetched page: HTTP status plus the raw body.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Abstract page-fetch collaborator. Failures never propagate past the
/// extraction layer; enrichment is strictly best-effort.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return its status and body.
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

// ---------------------------------------------------------------------------
// HttpPageFetcher
// ---------------------------------------------------------------------------

/// [`PageFetcher`] backed by a timeout-bounded reqwest client.
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// Create a fetcher with default timeout and redirect settings.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| MentorScoutError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!(%url, "fetching page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MentorScoutError::Network(format!("{url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| MentorScoutError::Network(format!("{url}: failed to read body: {e}")))?;

        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fetch_returns_status_and_body() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/in/janedoe"))
            .respond_with(
                wiremock::ResponseTemplate::new(200)
                    .set_body_string("<html><title>Jane Doe | LinkedIn</title></html>"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpPageFetcher::new().unwrap();
        let page = fetcher
            .fetch(&format!("{}/in/janedoe", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.status, 200);
        assert!(page.body.contains("Jane Doe"));
    }

    #[tokio::test]
    async fn non_success_status_is_not_an_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(404))
            .mount(&server)
            .await;

        // A 404 still yields a page; the caller decides what to do with it.
        let fetcher = HttpPageFetcher::new().unwrap();
        let page = fetcher
            .fetch(&format!("{}/in/nobody", server.uri()))
            .await
            .unwrap();
        assert_eq!(page.status, 404);
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let fetcher = HttpPageFetcher::new().unwrap();
        let err = fetcher
            .fetch("http://127.0.0.1:1/unreachable")
            .await
            .unwrap_err();
        assert!(matches!(err, MentorScoutError::Network(_)));
    }
}
