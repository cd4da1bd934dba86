//! Heuristic candidate extraction from raw search results.
//!
//! One noisy search hit goes in; a typed [`Candidate`] comes out, or the hit
//! is rejected. Rejection is a filter decision, not an error: each reason is
//! named and logged, and the caller simply sees `None`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use mentorscout_search::PageFetcher;
use mentorscout_shared::{Candidate, RawResult};

use crate::enrich::enrich_profile;
use crate::sentiment::{SentimentOracle, snippet_sentiment};

/// Profile links must contain this path segment to be considered.
const PROFILE_PATH_MARKER: &str = "linkedin.com/in/";

/// Provenance tag stamped on every extracted candidate.
const SOURCE_TAG: &str = "linkedin";

/// Keywords suggesting the result describes a person.
const PERSON_INDICATORS: [&str; 8] = [
    "founder",
    "ceo",
    "entrepreneur",
    "professional",
    "expert",
    "specialist",
    "mentor",
    "advisor",
];

/// Keywords suggesting the result describes an organization or product.
const NON_PERSON_INDICATORS: [&str; 9] = [
    "company",
    "corporation",
    "ltd",
    "llc",
    "inc",
    "website",
    "platform",
    "service",
    "product",
];

/// Role tokens stripped from titles during name extraction, in application
/// order.
const ROLE_SUFFIXES: [&str; 8] = [
    "CEO",
    "Founder",
    "Co-Founder",
    "Expert",
    "Mentor",
    "Advisor",
    "Professional",
    "Specialist",
];

/// Lead-in phrases that introduce an expertise area.
const EXPERTISE_LEADINS: [&str; 6] = [
    "specialist in",
    "expert in",
    "experienced in",
    "focused on",
    "specializing in",
    "expertise in",
];

/// Why a search result was not turned into a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reject {
    /// The link does not point at a profile page.
    NotProfileUrl,
    /// The person-vs-entity heuristic favored "not a person" (ties reject).
    NotPerson,
    /// Name extraction produced an empty string.
    EmptyName,
}

// ---------------------------------------------------------------------------
// Extractor
// ---------------------------------------------------------------------------

/// Turns raw search results into candidates, using injected collaborators
/// for page enrichment and sentiment.
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    sentiment: Arc<dyn SentimentOracle>,
}

impl Extractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, sentiment: Arc<dyn SentimentOracle>) -> Self {
        Self { fetcher, sentiment }
    }

    /// Extract a candidate from `raw`, or reject it.
    ///
    /// Pure apart from the enrichment fetch and sentiment call, both of
    /// which degrade to neutral defaults on failure.
    pub async fn extract(&self, raw: &RawResult) -> Option<Candidate> {
        match self.try_extract(raw).await {
            Ok(candidate) => Some(candidate),
            Err(reason) => {
                debug!(link = %raw.link, ?reason, "search result rejected");
                None
            }
        }
    }

    async fn try_extract(&self, raw: &RawResult) -> Result<Candidate, Reject> {
        if !raw.link.to_lowercase().contains(PROFILE_PATH_MARKER) {
            return Err(Reject::NotProfileUrl);
        }

        if !is_likely_person(&raw.title, &raw.snippet) {
            return Err(Reject::NotPerson);
        }

        let name = extract_name(&raw.title);
        if name.is_empty() {
            return Err(Reject::EmptyName);
        }

        let enrichment = enrich_profile(self.fetcher.as_ref(), &raw.link).await;

        let title = enrichment.headline.unwrap_or_else(|| raw.title.clone());
        let summary = enrichment.summary.unwrap_or_else(|| raw.snippet.clone());
        let expertise = extract_expertise(&summary);
        let experience_years = enrichment
            .experience_years
            .unwrap_or_else(|| extract_experience(&raw.snippet));
        let sentiment_score = snippet_sentiment(self.sentiment.as_ref(), &raw.snippet).await;

        Ok(Candidate {
            name,
            title,
            summary,
            profile_url: raw.link.clone(),
            expertise,
            experience_years,
            contact_info: HashMap::from([(SOURCE_TAG.to_string(), raw.link.clone())]),
            sentiment_score,
            source: SOURCE_TAG.to_string(),
            last_updated: Utc::now(),
            relevance_score: 0.0,
        })
    }
}

// ---------------------------------------------------------------------------
// Heuristics
// ---------------------------------------------------------------------------

/// Coarse person-vs-entity precision filter over keyword counts.
/// Each keyword contributes at most once; ties favor rejection.
fn is_likely_person(title: &str, snippet: &str) -> bool {
    let text = format!("{title} {snippet}").to_lowercase();

    let person_score = PERSON_INDICATORS
        .iter()
        .filter(|word| text.contains(*word))
        .count();
    let non_person_score = NON_PERSON_INDICATORS
        .iter()
        .filter(|word| text.contains(*word))
        .count();

    person_score > non_person_score
}

/// Extract a person's name from a result title by iteratively truncating at
/// role suffixes and the `" - "` delimiter, keeping the left-hand side.
fn extract_name(title: &str) -> String {
    let mut name = title.to_string();

    for suffix in ROLE_SUFFIXES {
        if let Some(idx) = name.find(&format!(" {suffix}")) {
            name.truncate(idx);
        }
        if let Some(idx) = name.find(" - ") {
            name.truncate(idx);
        }
    }

    name.trim().to_string()
}

/// Collect expertise phrases: for each lead-in found case-insensitively,
/// take the original-case text up to the next sentence terminator.
fn extract_expertise(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut seen = HashSet::new();
    let mut expertise = Vec::new();

    for leadin in EXPERTISE_LEADINS {
        let Some(pos) = lower.find(leadin) else {
            continue;
        };
        let start = pos + leadin.len();
        let Some(len) = lower[start..].find('.') else {
            continue;
        };
        // Indices come from the lowercased copy; slice defensively in case
        // case folding shifted byte offsets.
        let Some(raw_phrase) = text.get(start..start + len) else {
            continue;
        };

        let phrase = raw_phrase.trim().to_string();
        if !phrase.is_empty() && seen.insert(phrase.clone()) {
            expertise.push(phrase);
        }
    }

    expertise
}

/// Fallback experience estimate from the snippet: the first integer token
/// immediately preceding a "years" token, when "experience" is also present.
fn extract_experience(snippet: &str) -> u32 {
    let lower = snippet.to_lowercase();
    if !lower.contains("years") || !lower.contains("experience") {
        return 0;
    }

    let words: Vec<&str> = lower.split_whitespace().collect();
    for i in 1..words.len() {
        if words[i] != "years" {
            continue;
        }
        if let Ok(n) = words[i - 1].parse::<u32>() {
            return n;
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mentorscout_search::FetchedPage;
    use mentorscout_shared::{MentorScoutError, Result as MsResult};

    use crate::sentiment::{Sentiment, SentimentLabel};

    struct NoPage;

    #[async_trait]
    impl PageFetcher for NoPage {
        async fn fetch(&self, url: &str) -> MsResult<FetchedPage> {
            Err(MentorScoutError::Network(format!("{url}: unreachable")))
        }
    }

    struct PositiveOracle;

    #[async_trait]
    impl SentimentOracle for PositiveOracle {
        async fn classify(&self, _text: &str) -> MsResult<Sentiment> {
            Ok(Sentiment {
                label: SentimentLabel::Positive,
                confidence: 0.9,
            })
        }
    }

    fn extractor() -> Extractor {
        Extractor::new(Arc::new(NoPage), Arc::new(PositiveOracle))
    }

    fn linkedin_result() -> RawResult {
        RawResult {
            title: "Jane Doe - Fintech Founder".into(),
            snippet: "10 years of experience in fintech, expert in payments.".into(),
            link: "https://www.linkedin.com/in/janedoe".into(),
        }
    }

    // --- name extraction ---

    #[test]
    fn name_stops_at_dash_delimiter() {
        assert_eq!(extract_name("Jane Doe - Fintech Founder"), "Jane Doe");
    }

    #[test]
    fn name_stops_at_role_suffix() {
        assert_eq!(extract_name("John Smith CEO at Acme"), "John Smith");
        assert_eq!(extract_name("Amy Wu Founder of FinCo"), "Amy Wu");
    }

    #[test]
    fn plain_name_passes_through_trimmed() {
        assert_eq!(extract_name("  Maria Garcia  "), "Maria Garcia");
    }

    #[test]
    fn title_that_is_only_a_suffix_yields_empty() {
        assert_eq!(extract_name(" Founder"), "");
    }

    // --- person filter ---

    #[test]
    fn person_keywords_beat_entity_keywords() {
        assert!(is_likely_person(
            "Jane Doe - Fintech Founder",
            "Mentor and advisor to startups."
        ));
    }

    #[test]
    fn entity_keywords_reject() {
        assert!(!is_likely_person(
            "Acme Inc",
            "A payments platform for businesses."
        ));
    }

    #[test]
    fn tie_rejects() {
        // "founder" vs "company": 1 vs 1.
        assert!(!is_likely_person("Founder", "A company."));
    }

    // --- expertise ---

    #[test]
    fn expertise_captured_in_original_case() {
        let phrases = extract_expertise("She is an expert in Machine Learning. More text.");
        assert_eq!(phrases, vec!["Machine Learning".to_string()]);
    }

    #[test]
    fn multiple_leadins_collected_without_duplicates() {
        let phrases = extract_expertise(
            "Specializing in payments. Also experienced in fraud detection. Done.",
        );
        assert!(phrases.contains(&"payments".to_string()));
        assert!(phrases.contains(&"fraud detection".to_string()));
        assert_eq!(phrases.len(), 2);
    }

    #[test]
    fn leadin_without_terminator_is_skipped() {
        assert!(extract_expertise("expert in everything").is_empty());
    }

    // --- experience fallback ---

    #[test]
    fn experience_parsed_before_years_token() {
        assert_eq!(extract_experience("10 years of experience in fintech."), 10);
    }

    #[test]
    fn experience_needs_both_markers() {
        assert_eq!(extract_experience("10 years in fintech."), 0);
        assert_eq!(extract_experience("Lots of experience."), 0);
    }

    #[test]
    fn non_numeric_predecessor_is_skipped() {
        // First "years" is preceded by "many"; the second by a number.
        assert_eq!(
            extract_experience("many years ago, now 7 years of experience"),
            7
        );
    }

    // --- extraction end to end ---

    #[tokio::test]
    async fn extracts_candidate_from_linkedin_result() {
        let candidate = extractor().extract(&linkedin_result()).await.unwrap();

        assert_eq!(candidate.name, "Jane Doe");
        assert_eq!(candidate.experience_years, 10);
        assert_eq!(candidate.expertise, vec!["payments".to_string()]);
        assert_eq!(candidate.sentiment_score, 0.9);
        assert_eq!(candidate.source, "linkedin");
        assert_eq!(
            candidate.contact_info.get("linkedin").map(String::as_str),
            Some("https://www.linkedin.com/in/janedoe")
        );
        assert_eq!(candidate.relevance_score, 0.0);
    }

    #[tokio::test]
    async fn non_profile_link_is_rejected() {
        let raw = RawResult {
            title: "Jane Doe - Fintech Founder".into(),
            snippet: "Mentor.".into(),
            link: "https://www.linkedin.com/company/acme".into(),
        };
        assert!(extractor().extract(&raw).await.is_none());
    }

    #[tokio::test]
    async fn non_person_result_is_rejected() {
        let raw = RawResult {
            title: "Acme Inc".into(),
            snippet: "A payments platform.".into(),
            link: "https://www.linkedin.com/in/acme".into(),
        };
        assert!(extractor().extract(&raw).await.is_none());
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let raw = RawResult {
            title: " Founder".into(),
            snippet: "Founder and mentor and advisor.".into(),
            link: "https://www.linkedin.com/in/someone".into(),
        };
        assert!(extractor().extract(&raw).await.is_none());
    }

    #[tokio::test]
    async fn enrichment_overrides_snippet_fields() {
        struct ProfilePage;

        #[async_trait]
        impl PageFetcher for ProfilePage {
            async fn fetch(&self, _url: &str) -> MsResult<FetchedPage> {
                Ok(FetchedPage {
                    status: 200,
                    body: r#"<html>
                        <head><title>Jane Doe - Payments Lead | LinkedIn</title></head>
                        <body>
                            <section id="about">Expert in cross-border payments. Veteran.</section>
                            <section id="experience">2010 to 2024</section>
                        </body>
                    </html>"#
                        .to_string(),
                })
            }
        }

        let extractor = Extractor::new(Arc::new(ProfilePage), Arc::new(PositiveOracle));
        let candidate = extractor.extract(&linkedin_result()).await.unwrap();

        assert_eq!(candidate.title, "Jane Doe - Payments Lead");
        assert_eq!(candidate.summary, "Expert in cross-border payments. Veteran.");
        // Page years (2024 - 2010) win over the snippet fallback.
        assert_eq!(candidate.experience_years, 14);
        // Expertise comes from the enriched summary.
        assert_eq!(candidate.expertise, vec!["cross-border payments".to_string()]);
    }
}
