//! Sentiment oracle: black-box positive/negative classification.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use mentorscout_shared::{MentorScoutError, Result};

/// Only this many leading characters of a snippet are classified; sentiment
/// models truncate internally anyway and the head carries the signal.
const SENTIMENT_WINDOW_CHARS: usize = 512;

// ---------------------------------------------------------------------------
// SentimentOracle trait
// ---------------------------------------------------------------------------

/// Binary sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLabel {
    Positive,
    Negative,
}

/// A classification: label plus model confidence in [0, 1].
#[derive(Debug, Clone, Copy)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub confidence: f64,
}

/// Abstract sentiment collaborator, treated as a black box.
#[async_trait]
pub trait SentimentOracle: Send + Sync {
    /// Classify `text` as positive or negative with a confidence.
    async fn classify(&self, text: &str) -> Result<Sentiment>;
}

/// Score a snippet in [-1, 1]: positive label maps to `+confidence`,
/// negative to `-confidence`. Oracle failure degrades to 0.0 — sentiment is
/// a bonus signal, never a reason to drop a candidate.
pub async fn snippet_sentiment(oracle: &dyn SentimentOracle, text: &str) -> f64 {
    let window: String = text.chars().take(SENTIMENT_WINDOW_CHARS).collect();

    match oracle.classify(&window).await {
        Ok(sentiment) => {
            let score = match sentiment.label {
                SentimentLabel::Positive => sentiment.confidence,
                SentimentLabel::Negative => -sentiment.confidence,
            };
            debug!(score, "sentiment classified");
            score
        }
        Err(e) => {
            warn!(error = %e, "sentiment oracle failed, defaulting to neutral");
            0.0
        }
    }
}

// ---------------------------------------------------------------------------
// HttpSentimentClient
// ---------------------------------------------------------------------------

/// Response shape of a hosted text-classification model: one list of scored
/// labels per input.
#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// [`SentimentOracle`] backed by a hosted inference endpoint.
pub struct HttpSentimentClient {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

impl HttpSentimentClient {
    pub fn new(client: Client, endpoint: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_token,
        }
    }
}

#[async_trait]
impl SentimentOracle for HttpSentimentClient {
    async fn classify(&self, text: &str) -> Result<Sentiment> {
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
            .map_err(|e| MentorScoutError::Oracle(format!("sentiment request: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MentorScoutError::Oracle(format!(
                "sentiment endpoint: HTTP {status}"
            )));
        }

        let scored: Vec<Vec<LabelScore>> = response
            .json()
            .await
            .map_err(|e| MentorScoutError::Oracle(format!("sentiment response: {e}")))?;

        let best = scored
            .first()
            .and_then(|labels| {
                labels
                    .iter()
                    .max_by(|a, b| a.score.total_cmp(&b.score))
            })
            .ok_or_else(|| MentorScoutError::Oracle("sentiment response was empty".into()))?;

        let label = if best.label.to_uppercase().starts_with("POS") {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };

        Ok(Sentiment {
            label,
            confidence: best.score,
        })
    }
}
