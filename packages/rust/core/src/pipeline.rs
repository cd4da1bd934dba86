//! The mentor discovery pipeline.
//!
//! Fans a field-of-interest out into several query variants, runs them
//! concurrently against the search provider, extracts candidates from every
//! hit, then dedupes, scores, and ranks the pooled results. The pipeline
//! never fails: every stage degrades to "fewer results" rather than an error,
//! so the worst case is an empty list.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use mentorscout_extract::{Extractor, SentimentOracle};
use mentorscout_ranking::{EmbeddingOracle, dedupe, rank, score_candidates};
use mentorscout_search::{PageFetcher, SearchProvider, build_queries};
use mentorscout_shared::Candidate;

/// Tunables for a [`MentorFinder`], typically sourced from the `[defaults]`
/// config section.
#[derive(Debug, Clone)]
pub struct FinderOptions {
    /// Results requested from the provider per query variant.
    pub results_per_query: usize,
    /// Minimum years of experience; 0 disables the filter.
    pub min_experience: u32,
}

impl Default for FinderOptions {
    fn default() -> Self {
        Self {
            results_per_query: 10,
            min_experience: 0,
        }
    }
}

/// Orchestrates search fan-out, extraction, deduplication, scoring, and
/// ranking. All external collaborators are injected.
pub struct MentorFinder {
    provider: Arc<dyn SearchProvider>,
    extractor: Arc<Extractor>,
    embedder: Arc<dyn EmbeddingOracle>,
    options: FinderOptions,
}

impl MentorFinder {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        sentiment: Arc<dyn SentimentOracle>,
        embedder: Arc<dyn EmbeddingOracle>,
        options: FinderOptions,
    ) -> Self {
        Self {
            provider,
            extractor: Arc::new(Extractor::new(fetcher, sentiment)),
            embedder,
            options,
        }
    }

    /// Find the `top_k` most relevant mentors for `field`, optionally
    /// constrained to a location.
    ///
    /// Query variants run concurrently; a failing variant contributes an
    /// empty branch. Results are pooled in variant-submission order before
    /// deduplication, so the first occurrence of a duplicate identity is
    /// deterministic for a given provider response set.
    #[instrument(skip_all, fields(field = %field, location = ?location))]
    pub async fn find_mentors(
        &self,
        field: &str,
        location: Option<&str>,
        top_k: usize,
    ) -> Vec<Candidate> {
        let queries = build_queries(field, location);
        info!(variants = queries.len(), "starting mentor search");

        let mut handles = Vec::with_capacity(queries.len());
        for query in queries {
            let provider = Arc::clone(&self.provider);
            let extractor = Arc::clone(&self.extractor);
            let limit = self.options.results_per_query;
            handles.push(tokio::spawn(async move {
                run_query_branch(provider.as_ref(), extractor.as_ref(), &query, limit).await
            }));
        }

        // Join in submission order to keep pooling deterministic.
        let mut pooled = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(candidates) => pooled.extend(candidates),
                Err(e) => warn!(error = %e, "query branch task failed"),
            }
        }

        let mut candidates = dedupe(pooled);
        debug!(unique = candidates.len(), "candidates after dedupe");

        if self.options.min_experience > 0 {
            let before = candidates.len();
            candidates.retain(|c| c.experience_years >= self.options.min_experience);
            debug!(
                dropped = before - candidates.len(),
                min_experience = self.options.min_experience,
                "experience filter applied"
            );
        }

        score_candidates(self.embedder.as_ref(), &mut candidates, field).await;

        let ranked = rank(candidates, top_k);
        info!(count = ranked.len(), "mentor search complete");
        ranked
    }
}

/// One query variant: search, then extract each hit in order.
/// Search failure degrades to an empty branch.
async fn run_query_branch(
    provider: &dyn SearchProvider,
    extractor: &Extractor,
    query: &str,
    limit: usize,
) -> Vec<Candidate> {
    let results = match provider.search(query, limit).await {
        Ok(results) => results,
        Err(e) => {
            warn!(query, error = %e, "query variant failed");
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    for raw in &results {
        if let Some(candidate) = extractor.extract(raw).await {
            debug!(name = %candidate.name, query, "candidate extracted");
            candidates.push(candidate);
        }
    }
    candidates
}
