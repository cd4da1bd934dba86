//! Embedding oracle: black-box text-to-vector model plus cosine similarity.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use mentorscout_shared::{MentorScoutError, Result};

// ---------------------------------------------------------------------------
// EmbeddingOracle trait
// ---------------------------------------------------------------------------

/// Abstract embedding collaborator. No cross-version stability is guaranteed:
/// scores are only comparable within a single model.
#[async_trait]
pub trait EmbeddingOracle: Send + Sync {
    /// Embed `text` into a fixed-length vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Cosine similarity between two embedding vectors, in [-1, 1].
/// Zero-magnitude or mismatched-length inputs yield 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)) as f64
}

// ---------------------------------------------------------------------------
// HttpEmbeddingClient
// ---------------------------------------------------------------------------

/// Hosted feature-extraction endpoints return either a flat vector for a
/// single input or one vector per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddingResponse {
    Flat(Vec<f32>),
    Nested(Vec<Vec<f32>>),
}

/// [`EmbeddingOracle`] backed by a hosted inference endpoint.
pub struct HttpEmbeddingClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpEmbeddingClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_token,
        }
    }
}

#[async_trait]
impl EmbeddingOracle for HttpEmbeddingClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "inputs": text }));

        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MentorScoutError::Oracle(format!("embedding request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MentorScoutError::Oracle(format!(
                "embedding endpoint: HTTP {status}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| MentorScoutError::Oracle(format!("embedding response: {e}")))?;

        let vector = match parsed {
            EmbeddingResponse::Flat(v) => v,
            EmbeddingResponse::Nested(mut vs) => {
                if vs.is_empty() {
                    return Err(MentorScoutError::Oracle("embedding response was empty".into()));
                }
                vs.swap_remove(0)
            }
        };

        if vector.is_empty() {
            return Err(MentorScoutError::Oracle("embedding vector was empty".into()));
        }

        Ok(vector)
    }
}
