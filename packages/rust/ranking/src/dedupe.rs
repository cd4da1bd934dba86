//! Candidate deduplication and final ranking.

use std::cmp::Ordering;
use std::collections::HashSet;

use mentorscout_shared::Candidate;

/// Collapse structurally-identical candidates on `(name, profile_url)`.
///
/// O(n), order-preserving, first occurrence wins; fields are never merged
/// across duplicates.
pub fn dedupe(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| {
            let (name, url) = c.identity_key();
            seen.insert((name.to_string(), url.to_string()))
        })
        .collect()
}

/// Stable descending sort by `relevance_score`, truncated to `top_k`.
/// Ties keep their pre-sort relative order.
pub fn rank(mut candidates: Vec<Candidate>, top_k: usize) -> Vec<Candidate> {
    candidates.sort_by(|a, b| {
        b.relevance_score
            .partial_cmp(&a.relevance_score)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(top_k);
    candidates
}
