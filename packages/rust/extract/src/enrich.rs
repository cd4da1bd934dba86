//! Best-effort profile-page enrichment.
//!
//! When the profile URL is publicly fetchable, the page preview carries a
//! richer headline, an about section, and dated experience entries. All of
//! this is optional: any fetch or parse failure yields an empty enrichment
//! and extraction continues on the search-result fields alone.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use mentorscout_search::PageFetcher;

/// Matches four-digit year tokens from 2000 onward.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b20\d{2}\b").expect("year regex"));

/// Separator between the person's headline and the site name in `<title>`.
const TITLE_SEPARATOR: &str = " | ";

/// Optional fields recovered from a fetched profile page.
#[derive(Debug, Clone, Default)]
pub struct ProfileEnrichment {
    /// Headline from the page `<title>`, before the site-name separator.
    pub headline: Option<String>,
    /// Text of the about section, if present.
    pub summary: Option<String>,
    /// Span between earliest and latest year in the experience section,
    /// when at least two distinct years appear.
    pub experience_years: Option<u32>,
}

/// Fetch `url` and extract whatever profile fields the page exposes.
/// Never fails: any error collapses to an empty enrichment.
pub async fn enrich_profile(fetcher: &dyn PageFetcher, url: &str) -> ProfileEnrichment {
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            debug!(%url, error = %e, "enrichment fetch failed");
            return ProfileEnrichment::default();
        }
    };

    if page.status != 200 {
        debug!(%url, status = page.status, "enrichment skipped, non-200 response");
        return ProfileEnrichment::default();
    }

    parse_profile(&page.body)
}

/// Parse profile fields out of raw HTML.
pub(crate) fn parse_profile(html: &str) -> ProfileEnrichment {
    let doc = Html::parse_document(html);

    let title_sel = Selector::parse("title").expect("title selector");
    let about_sel = Selector::parse("section#about").expect("about selector");
    let experience_sel = Selector::parse("section#experience").expect("experience selector");

    let headline = doc.select(&title_sel).next().and_then(|el| {
        let text = el.text().collect::<String>();
        let head = text
            .split(TITLE_SEPARATOR)
            .next()
            .unwrap_or(&text)
            .trim()
            .to_string();
        (!head.is_empty()).then_some(head)
    });

    let summary = doc.select(&about_sel).next().and_then(|el| {
        let text = el.text().collect::<String>().trim().to_string();
        (!text.is_empty()).then_some(text)
    });

    let experience_years = doc
        .select(&experience_sel)
        .next()
        .and_then(|el| year_span(&el.text().collect::<String>()));

    ProfileEnrichment {
        headline,
        summary,
        experience_years,
    }
}

/// Span between the earliest and latest distinct year mentioned in `text`.
/// A single year gives no span: experience stays unknown.
fn year_span(text: &str) -> Option<u32> {
    let years: HashSet<u32> = YEAR_RE
        .find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect();

    if years.len() < 2 {
        return None;
    }

    let max = *years.iter().max().expect("non-empty set");
    let min = *years.iter().min().expect("non-empty set");
    Some(max - min)
}
