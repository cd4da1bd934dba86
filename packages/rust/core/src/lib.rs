//! Pipeline orchestration for MentorScout.
//!
//! Wires the search, extraction, and ranking crates into two user-facing
//! workflows: mentor discovery ([`MentorFinder`]) and competitor analysis
//! ([`CompetitorAnalyst`]).

mod competitor;
mod pipeline;
mod report;

pub use competitor::{CompetitorAnalyst, CompetitorProfile, CompetitorReport};
pub use pipeline::{FinderOptions, MentorFinder};
pub use report::{GeminiReportClient, ReportOracle};
