//! Google Custom Search JSON API provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use mentorscout_shared::{MentorScoutError, RawResult, Result};

/// Production endpoint of the Custom Search JSON API.
const GOOGLE_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// The API rejects `num` above 10.
const MAX_RESULTS_PER_CALL: usize = 10;

// ---------------------------------------------------------------------------
// SearchProvider trait
// ---------------------------------------------------------------------------

/// Abstract search collaborator: one query in, a list of raw hits out.
///
/// Each call fails independently; callers recover per-query, never globally.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Run `query` and return up to `limit` results.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RawResult>>;
}

// ---------------------------------------------------------------------------
// Response schema (the subset we consume)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
    #[serde(default)]
    link: String,
}

// ---------------------------------------------------------------------------
// GoogleSearchProvider
// ---------------------------------------------------------------------------

/// [`SearchProvider`] backed by the Google Custom Search JSON API.
pub struct GoogleSearchProvider {
    client: Client,
    api_key: String,
    cse_id: String,
    endpoint: String,
}

impl GoogleSearchProvider {
    /// Create a provider with the given credentials.
    pub fn new(client: Client, api_key: impl Into<String>, cse_id: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            cse_id: cse_id.into(),
            endpoint: GOOGLE_ENDPOINT.to_string(),
        }
    }

    /// Point the provider at a different endpoint (for mock-server tests).
    #[cfg(test)]
    fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl SearchProvider for GoogleSearchProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<RawResult>> {
        let num = limit.min(MAX_RESULTS_PER_CALL);
        info!(query, num, "dispatching search");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", &num.to_string()),
            ])
            .send()
            .await
            .map_err(|e| MentorScoutError::Network(format!("search '{query}': {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MentorScoutError::Search(format!(
                "'{query}': HTTP {status}"
            )));
        }

        let parsed: SearchResponse = response.json().await.map_err(|e| {
            MentorScoutError::parse(format!("search response for '{query}': {e}"))
        })?;

        let results: Vec<RawResult> = parsed
            .items
            .into_iter()
            .map(|item| RawResult {
                title: item.title,
                snippet: item.snippet,
                link: item.link,
            })
            .collect();

        debug!(query, count = results.len(), "search results received");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_for(server: &wiremock::MockServer) -> GoogleSearchProvider {
        GoogleSearchProvider::new(Client::new(), "test-key", "test-cx")
            .with_endpoint(format!("{}/customsearch/v1", server.uri()))
    }

    #[tokio::test]
    async fn parses_items_into_raw_results() {
        let server = wiremock::MockServer::start().await;

        let body = serde_json::json!({
            "items": [
                {
                    "title": "Jane Doe - Fintech Founder",
                    "snippet": "10 years of experience in fintech.",
                    "link": "https://www.linkedin.com/in/janedoe"
                },
                {
                    "title": "Acme Inc",
                    "snippet": "A payments platform.",
                    "link": "https://acme.example.com"
                }
            ]
        });

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/customsearch/v1"))
            .and(wiremock::matchers::query_param("q", "fintech founder"))
            .and(wiremock::matchers::query_param("key", "test-key"))
            .and(wiremock::matchers::query_param("cx", "test-cx"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let results = provider_for(&server)
            .search("fintech founder", 10)
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Jane Doe - Fintech Founder");
        assert_eq!(results[0].link, "https://www.linkedin.com/in/janedoe");
    }

    #[tokio::test]
    async fn empty_items_yields_empty_list() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
            )
            .mount(&server)
            .await;

        let results = provider_for(&server).search("anything", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn http_error_surfaces_as_search_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let err = provider_for(&server)
            .search("fintech", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, MentorScoutError::Search(_)));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn limit_is_capped_at_api_maximum() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::query_param("num", "10"))
            .respond_with(
                wiremock::ResponseTemplate::new(200).set_body_json(serde_json::json!({})),
            )
            .mount(&server)
            .await;

        // 50 exceeds the API maximum; the request must carry num=10.
        let results = provider_for(&server).search("fintech", 50).await.unwrap();
        assert!(results.is_empty());
    }
}
