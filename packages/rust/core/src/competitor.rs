//! Competitor landscape analysis for a product idea.
//!
//! Searches for competing products, scrapes their public websites for
//! positioning text, classifies sentiment, summarizes each one, and asks the
//! report oracle for an overall feasibility assessment. Like the mentor
//! pipeline, every stage degrades gracefully: an unreachable website or a
//! failed model call produces a thinner profile, never an error.

use std::sync::Arc;

use scraper::{Html, Selector};
use serde::Serialize;
use tracing::{debug, instrument, warn};

use mentorscout_extract::{SentimentOracle, snippet_sentiment};
use mentorscout_search::{PageFetcher, SearchProvider};

use crate::report::ReportOracle;

/// Title substrings marking a search hit as an article rather than a product.
const NOISE_MARKERS: [&str; 5] = ["how to", "guide", "tutorial", "list of", "article"];

/// Maximum characters of scraped website text kept per competitor.
const WEBSITE_CONTENT_CAP: usize = 5000;

/// Fallback summary length when the report oracle is unavailable.
const SUMMARY_FALLBACK_CHARS: usize = 150;

/// One analyzed competitor.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorProfile {
    pub name: String,
    pub website: Option<String>,
    pub sentiment_score: f64,
    pub summary: String,
}

/// The full analysis: per-competitor profiles plus a feasibility report.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitorReport {
    pub competitors: Vec<CompetitorProfile>,
    pub feasibility: String,
}

/// Analyzes the competitive landscape around a product idea.
pub struct CompetitorAnalyst {
    provider: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    sentiment: Arc<dyn SentimentOracle>,
    reporter: Arc<dyn ReportOracle>,
}

impl CompetitorAnalyst {
    pub fn new(
        provider: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        sentiment: Arc<dyn SentimentOracle>,
        reporter: Arc<dyn ReportOracle>,
    ) -> Self {
        Self {
            provider,
            fetcher,
            sentiment,
            reporter,
        }
    }

    /// Analyze up to `limit` competitors for `idea`.
    #[instrument(skip_all, fields(idea = %idea))]
    pub async fn analyze(&self, idea: &str, limit: usize) -> CompetitorReport {
        let names = self.search_competitors(idea, limit).await;

        let mut competitors = Vec::with_capacity(names.len());
        for name in names {
            competitors.push(self.analyze_competitor(&name).await);
        }

        let feasibility = self.feasibility_report(idea, &competitors).await;
        CompetitorReport {
            competitors,
            feasibility,
        }
    }

    /// Search for competitor names, filtering out listicles and tutorials.
    async fn search_competitors(&self, idea: &str, limit: usize) -> Vec<String> {
        let query = format!("{idea} app competitors OR alternatives OR similar apps");
        let results = match self.provider.search(&query, limit).await {
            Ok(results) => results,
            Err(e) => {
                warn!(error = %e, "competitor search failed");
                return Vec::new();
            }
        };

        results
            .iter()
            .filter(|r| {
                let haystack = format!("{} {}", r.title, r.snippet).to_lowercase();
                !NOISE_MARKERS.iter().any(|m| haystack.contains(m))
            })
            .map(|r| clean_competitor_name(&r.title))
            .filter(|name| !name.is_empty())
            .take(limit)
            .collect()
    }

    /// Build a profile for one competitor: website, sentiment, summary.
    async fn analyze_competitor(&self, name: &str) -> CompetitorProfile {
        let website = self.find_website(name).await;

        let content = match &website {
            Some(url) => self.scrape_website(url).await,
            None => String::new(),
        };

        if content.is_empty() {
            debug!(name, "no website content, profile will be thin");
            return CompetitorProfile {
                name: name.to_string(),
                website,
                sentiment_score: 0.0,
                summary: "No public website content found.".to_string(),
            };
        }

        let sentiment_score = snippet_sentiment(self.sentiment.as_ref(), &content).await;
        let summary = self.summarize(name, &content).await;

        CompetitorProfile {
            name: name.to_string(),
            website,
            sentiment_score,
            summary,
        }
    }

    async fn find_website(&self, name: &str) -> Option<String> {
        let query = format!("{name} app official website");
        match self.provider.search(&query, 1).await {
            Ok(results) => results.into_iter().next().map(|r| r.link),
            Err(e) => {
                warn!(name, error = %e, "website lookup failed");
                None
            }
        }
    }

    /// Fetch a competitor website and pull out its readable text, capped at
    /// [`WEBSITE_CONTENT_CAP`] characters.
    async fn scrape_website(&self, url: &str) -> String {
        let page = match self.fetcher.fetch(url).await {
            Ok(page) if page.status == 200 => page,
            Ok(page) => {
                debug!(url, status = page.status, "website returned non-200");
                return String::new();
            }
            Err(e) => {
                debug!(url, error = %e, "website fetch failed");
                return String::new();
            }
        };

        readable_text(&page.body)
    }

    /// Summarize website content via the report oracle, falling back to a
    /// raw-text prefix when the model is unavailable.
    async fn summarize(&self, name: &str, content: &str) -> String {
        let prompt = format!(
            "Summarize what the product \"{name}\" does in two or three sentences, \
             based on this website text:\n\n{content}"
        );

        match self.reporter.generate(&prompt).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(name, error = %e, "summary generation failed, using text prefix");
                let prefix: String = content.chars().take(SUMMARY_FALLBACK_CHARS).collect();
                format!("{prefix}...")
            }
        }
    }

    /// Ask the report oracle for an overall feasibility assessment.
    async fn feasibility_report(&self, idea: &str, competitors: &[CompetitorProfile]) -> String {
        let mut prompt = format!(
            "Assess the feasibility of this product idea: {idea}\n\n\
             Known competitors:\n"
        );
        if competitors.is_empty() {
            prompt.push_str("(none found)\n");
        }
        for competitor in competitors {
            prompt.push_str(&format!(
                "- {} (sentiment {:.2}): {}\n",
                competitor.name, competitor.sentiment_score, competitor.summary
            ));
        }
        prompt.push_str(
            "\nCover: market saturation, differentiation opportunities, \
             and an overall go/no-go recommendation.",
        );

        match self.reporter.generate(&prompt).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "feasibility report generation failed");
                "Unable to generate a feasibility report.".to_string()
            }
        }
    }
}

/// Strip a search-result title down to a product name: keep the part before
/// the first separator and drop surrounding whitespace.
fn clean_competitor_name(title: &str) -> String {
    let head = title
        .split(" - ")
        .next()
        .and_then(|t| t.split(" | ").next())
        .unwrap_or(title);
    head.trim().to_string()
}

/// Extract readable text from an HTML document: content-bearing elements
/// only, so scripts and styles never leak into the analysis.
fn readable_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("p, h1, h2, h3, h4, li").expect("static selector must parse");

    let mut text = String::new();
    for element in document.select(&selector) {
        for chunk in element.text() {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(chunk);
            if text.chars().count() >= WEBSITE_CONTENT_CAP {
                return text.chars().take(WEBSITE_CONTENT_CAP).collect();
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mentorscout_extract::{Sentiment, SentimentLabel};
    use mentorscout_search::FetchedPage;
    use mentorscout_shared::{MentorScoutError, RawResult, Result};

    struct ScriptedProvider;

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        async fn search(&self, query: &str, _limit: usize) -> Result<Vec<RawResult>> {
            if query.contains("official website") {
                return Ok(vec![RawResult {
                    title: "PayFast".into(),
                    snippet: String::new(),
                    link: "https://payfast.example".into(),
                }]);
            }
            Ok(vec![
                RawResult {
                    title: "PayFast - Payments App".into(),
                    snippet: "A payments app for small businesses.".into(),
                    link: "https://payfast.example".into(),
                },
                RawResult {
                    title: "How to build a payments app".into(),
                    snippet: "A tutorial.".into(),
                    link: "https://blog.example/how-to".into(),
                },
                RawResult {
                    title: "List of payment apps".into(),
                    snippet: "Top 10 guide.".into(),
                    link: "https://blog.example/list".into(),
                },
            ])
        }
    }

    struct StaticFetcher(&'static str);

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage> {
            Ok(FetchedPage {
                status: 200,
                body: self.0.to_string(),
            })
        }
    }

    struct PositiveSentiment;

    #[async_trait]
    impl SentimentOracle for PositiveSentiment {
        async fn classify(&self, _text: &str) -> Result<Sentiment> {
            Ok(Sentiment {
                label: SentimentLabel::Positive,
                confidence: 0.8,
            })
        }
    }

    struct EchoReporter;

    #[async_trait]
    impl ReportOracle for EchoReporter {
        async fn generate(&self, prompt: &str) -> Result<String> {
            Ok(format!("report for: {}", &prompt[..20.min(prompt.len())]))
        }
    }

    struct BrokenReporter;

    #[async_trait]
    impl ReportOracle for BrokenReporter {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(MentorScoutError::Oracle("model unavailable".into()))
        }
    }

    const SITE: &str = r#"
        <html><head><style>p { color: red; }</style></head>
        <body>
          <script>var tracking = true;</script>
          <h1>PayFast</h1>
          <p>Fast payments for small businesses.</p>
        </body></html>
    "#;

    fn analyst(reporter: Arc<dyn ReportOracle>) -> CompetitorAnalyst {
        CompetitorAnalyst::new(
            Arc::new(ScriptedProvider),
            Arc::new(StaticFetcher(SITE)),
            Arc::new(PositiveSentiment),
            reporter,
        )
    }

    #[tokio::test]
    async fn noise_results_are_filtered_out() {
        let report = analyst(Arc::new(EchoReporter)).analyze("payments", 5).await;

        assert_eq!(report.competitors.len(), 1);
        assert_eq!(report.competitors[0].name, "PayFast");
    }

    #[tokio::test]
    async fn profile_carries_website_sentiment_and_summary() {
        let report = analyst(Arc::new(EchoReporter)).analyze("payments", 5).await;

        let profile = &report.competitors[0];
        assert_eq!(profile.website.as_deref(), Some("https://payfast.example"));
        assert!((profile.sentiment_score - 0.8).abs() < 1e-9);
        assert!(profile.summary.starts_with("report for:"));
        assert!(report.feasibility.starts_with("report for:"));
    }

    #[tokio::test]
    async fn broken_reporter_falls_back_to_text_prefix() {
        let report = analyst(Arc::new(BrokenReporter)).analyze("payments", 5).await;

        let profile = &report.competitors[0];
        assert!(profile.summary.contains("PayFast"));
        assert!(profile.summary.ends_with("..."));
        assert_eq!(report.feasibility, "Unable to generate a feasibility report.");
    }

    #[test]
    fn readable_text_skips_scripts_and_styles() {
        let text = readable_text(SITE);
        assert!(text.contains("Fast payments"));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn readable_text_is_capped() {
        let long = format!("<p>{}</p>", "word ".repeat(3000));
        let text = readable_text(&long);
        assert!(text.chars().count() <= WEBSITE_CONTENT_CAP);
    }

    #[test]
    fn titles_are_cleaned_to_product_names() {
        assert_eq!(clean_competitor_name("PayFast - Payments App"), "PayFast");
        assert_eq!(clean_competitor_name("PayFast | Home"), "PayFast");
        assert_eq!(clean_competitor_name("  PayFast  "), "PayFast");
    }
}
