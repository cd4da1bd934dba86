//! Search-provider and page-fetch collaborators for MentorScout.
//!
//! Defines the abstract [`SearchProvider`] and [`PageFetcher`] contracts the
//! pipeline is written against, plus the production implementations: the
//! Google Custom Search JSON API client and a timeout-bounded HTTP fetcher.
//! Query-variant generation lives here too, next to the provider it feeds.

mod fetch;
mod google;
mod query;

pub use fetch::{FetchedPage, HttpPageFetcher, PageFetcher};
pub use google::{GoogleSearchProvider, SearchProvider};
pub use query::build_queries;
