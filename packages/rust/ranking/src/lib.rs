//! Deduplication and relevance ranking for extracted candidates.
//!
//! Scores combine black-box semantic similarity (via an injected
//! [`EmbeddingOracle`]) with heuristic experience and sentiment bonuses.

mod dedupe;
mod embedding;
mod scorer;

pub use dedupe::{dedupe, rank};
pub use embedding::{EmbeddingOracle, HttpEmbeddingClient, cosine_similarity};
pub use scorer::{composite_weight, score_candidates};
