//! Composite relevance scoring.
//!
//! Semantic similarity between the query field and a candidate's profile
//! text, scaled by a heuristic weight built from experience and sentiment.

use tracing::{debug, warn};

use mentorscout_shared::Candidate;

use crate::embedding::{EmbeddingOracle, cosine_similarity};

/// Base relevance applied to every candidate.
const BASE_WEIGHT: f64 = 0.6;

/// Maximum bonus for experience, reached at [`EXPERIENCE_CAP_YEARS`].
const EXPERIENCE_WEIGHT: f64 = 0.2;

/// Maximum bonus for positive sentiment.
const SENTIMENT_WEIGHT: f64 = 0.2;

/// Years of experience at which the experience bonus saturates.
const EXPERIENCE_CAP_YEARS: f64 = 10.0;

/// The heuristic multiplier applied to semantic similarity.
///
/// Experience contributes up to 0.2, capped at ten years. Sentiment
/// contributes up to 0.2 but only when positive: negative sentiment never
/// drags the weight below base.
pub fn composite_weight(experience_years: u32, sentiment_score: f64) -> f64 {
    BASE_WEIGHT
        + EXPERIENCE_WEIGHT * (f64::from(experience_years) / EXPERIENCE_CAP_YEARS).min(1.0)
        + SENTIMENT_WEIGHT * sentiment_score.max(0.0)
}

/// The candidate text that gets embedded: expertise phrases then summary.
fn profile_text(candidate: &Candidate) -> String {
    format!("{} {}", candidate.expertise.join(" "), candidate.summary)
}

/// Assign `relevance_score` to every candidate against `field`.
///
/// The query is embedded once; each candidate's profile text is embedded and
/// compared by cosine similarity. Oracle failures degrade to a score of 0.0
/// for the affected candidates — scoring never fails the pipeline.
pub async fn score_candidates(
    oracle: &dyn EmbeddingOracle,
    candidates: &mut [Candidate],
    field: &str,
) {
    if candidates.is_empty() {
        return;
    }

    let query_embedding = match oracle.embed(field).await {
        Ok(v) => v,
        Err(e) => {
            warn!(field, error = %e, "query embedding failed, scoring all candidates 0");
            for candidate in candidates.iter_mut() {
                candidate.relevance_score = 0.0;
            }
            return;
        }
    };

    for candidate in candidates.iter_mut() {
        let text = profile_text(candidate);
        let similarity = match oracle.embed(&text).await {
            Ok(v) => cosine_similarity(&query_embedding, &v),
            Err(e) => {
                warn!(name = %candidate.name, error = %e, "candidate embedding failed");
                candidate.relevance_score = 0.0;
                continue;
            }
        };

        candidate.relevance_score =
            similarity * composite_weight(candidate.experience_years, candidate.sentiment_score);

        debug!(
            name = %candidate.name,
            similarity,
            relevance = candidate.relevance_score,
            "candidate scored"
        );
    }
}
