//! Report-generation oracle: a hosted language model used for competitor
//! summaries and feasibility reports.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use mentorscout_shared::{MentorScoutError, Result};

/// Abstract text-generation collaborator.
#[async_trait]
pub trait ReportOracle: Send + Sync {
    /// Generate prose for `prompt`.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

// ---------------------------------------------------------------------------
// Gemini wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// GeminiReportClient
// ---------------------------------------------------------------------------

/// [`ReportOracle`] backed by the Gemini `generateContent` REST API.
pub struct GeminiReportClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiReportClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ReportOracle for GeminiReportClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| MentorScoutError::Oracle(format!("report request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MentorScoutError::Oracle(format!(
                "report endpoint: HTTP {status}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| MentorScoutError::Oracle(format!("report response: {e}")))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(MentorScoutError::Oracle(
                "report response had no candidates".into(),
            ));
        }

        Ok(text)
    }
}
