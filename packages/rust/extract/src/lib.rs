//! Candidate extraction from noisy search results.
//!
//! The [`Extractor`] is a precision filter and field harvester: it rejects
//! hits that are not personal profiles, derives a name from the result title,
//! pulls expertise and experience signals out of snippet text, and enriches
//! from the profile page when it is publicly fetchable. Sentiment comes from
//! an injected black-box oracle.

mod enrich;
mod extractor;
mod sentiment;

pub use enrich::{ProfileEnrichment, enrich_profile};
pub use extractor::{Extractor, Reject};
pub use sentiment::{
    HttpSentimentClient, Sentiment, SentimentLabel, SentimentOracle, snippet_sentiment,
};
