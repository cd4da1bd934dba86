//! Core domain types for mentor discovery.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RawResult
// ---------------------------------------------------------------------------

/// One search-engine hit, as returned by a search provider.
///
/// Ephemeral: produced by the provider, consumed once by the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawResult {
    /// Result title (e.g. a page or profile heading).
    pub title: String,
    /// Short text excerpt from the result page.
    pub snippet: String,
    /// Link to the result page.
    pub link: String,
}

// ---------------------------------------------------------------------------
// Candidate
// ---------------------------------------------------------------------------

/// A discovered mentor/competitor profile, extracted from a search result.
///
/// Two candidates are the same identity iff `(name, profile_url)` are equal;
/// that pair is the dedup key — there is no separate identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Person's name, derived from the result title. Always non-empty:
    /// results that yield an empty name are dropped at extraction.
    pub name: String,
    /// Best-effort job/role description.
    pub title: String,
    /// Free text used for relevance scoring.
    pub summary: String,
    /// Profile page URL; part of the identity key.
    pub profile_url: String,
    /// Areas of expertise; duplicate-free, order irrelevant, may be empty.
    #[serde(default)]
    pub expertise: Vec<String>,
    /// Estimated years of experience; 0 means unknown.
    #[serde(default)]
    pub experience_years: u32,
    /// Contact channels keyed by channel name (e.g. "linkedin").
    #[serde(default)]
    pub contact_info: HashMap<String, String>,
    /// Sentiment of the profile text in [-1, 1]; 0.0 when unknown.
    #[serde(default)]
    pub sentiment_score: f64,
    /// Provenance tag (e.g. "linkedin").
    pub source: String,
    /// When this candidate was extracted.
    pub last_updated: DateTime<Utc>,
    /// Composite relevance score, assigned during ranking; 0 beforehand.
    #[serde(default)]
    pub relevance_score: f64,
}

impl Candidate {
    /// The `(name, profile_url)` pair used to detect duplicates.
    pub fn identity_key(&self) -> (&str, &str) {
        (&self.name, &self.profile_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str, url: &str) -> Candidate {
        Candidate {
            name: name.into(),
            title: "Founder".into(),
            summary: "Builds things.".into(),
            profile_url: url.into(),
            expertise: vec!["payments".into()],
            experience_years: 5,
            contact_info: HashMap::from([("linkedin".to_string(), url.to_string())]),
            sentiment_score: 0.5,
            source: "linkedin".into(),
            last_updated: Utc::now(),
            relevance_score: 0.0,
        }
    }

    #[test]
    fn identity_key_is_name_and_url() {
        let c = candidate("Jane Doe", "https://linkedin.com/in/janedoe");
        assert_eq!(
            c.identity_key(),
            ("Jane Doe", "https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn candidate_serialization_roundtrip() {
        let c = candidate("Jane Doe", "https://linkedin.com/in/janedoe");
        let json = serde_json::to_string(&c).expect("serialize");
        let parsed: Candidate = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed.name, "Jane Doe");
        assert_eq!(parsed.experience_years, 5);
        assert_eq!(
            parsed.contact_info.get("linkedin").map(String::as_str),
            Some("https://linkedin.com/in/janedoe")
        );
    }

    #[test]
    fn optional_fields_default_on_deserialize() {
        let json = r#"{
            "name": "Jane Doe",
            "title": "",
            "summary": "",
            "profile_url": "https://linkedin.com/in/janedoe",
            "source": "linkedin",
            "last_updated": "2026-01-01T00:00:00Z"
        }"#;
        let parsed: Candidate = serde_json::from_str(json).expect("deserialize");
        assert!(parsed.expertise.is_empty());
        assert_eq!(parsed.experience_years, 0);
        assert_eq!(parsed.sentiment_score, 0.0);
        assert_eq!(parsed.relevance_score, 0.0);
    }
}
