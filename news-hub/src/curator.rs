use crate::types::{CuratedArticle, RawArticle};
use crate::utils::text::{title_key, truncate_with_marker};
use std::collections::HashSet;
use tracing::{debug, info};

pub const SUMMARY_MAX_CHARS: usize = 200;
pub const ELLIPSIS: &str = "...";

/// Deduplicates raw articles by normalized title and shapes them into
/// curated records. First occurrence wins; input order is preserved.
#[derive(Debug, Default)]
pub struct Curator {
    seen_titles: HashSet<String>,
}

impl Curator {
    pub fn new() -> Self {
        Self {
            seen_titles: HashSet::new(),
        }
    }

    pub fn curate(&mut self, raw: &[RawArticle]) -> Vec<CuratedArticle> {
        let mut curated = Vec::with_capacity(raw.len());

        for article in raw {
            if let Some(entry) = self.curate_one(article) {
                curated.push(entry);
            }
        }

        info!("Curated {} of {} raw articles", curated.len(), raw.len());
        curated
    }

    fn curate_one(&mut self, article: &RawArticle) -> Option<CuratedArticle> {
        if article.title.trim().is_empty() {
            debug!("Skipping article without title: {}", article.url);
            return None;
        }

        let key = title_key(&article.title);
        if !self.seen_titles.insert(key) {
            debug!("Skipping duplicate title: {}", article.title);
            return None;
        }

        Some(CuratedArticle {
            title: article.title.clone(),
            summary: truncate_with_marker(&article.description, SUMMARY_MAX_CHARS, ELLIPSIS),
            source: article.source.clone(),
            url: article.url.clone(),
            published: article.published_at.clone(),
            content: article.content.clone(),
        })
    }
}

/// Curate a single batch with a fresh set of seen titles.
pub fn curate(raw: &[RawArticle]) -> Vec<CuratedArticle> {
    Curator::new().curate(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(title: &str, description: &str) -> RawArticle {
        RawArticle {
            title: title.to_string(),
            description: description.to_string(),
            source: "Wire".to_string(),
            url: format!("https://example.com/{}", title.len()),
            published_at: "2024-05-01T10:00:00Z".to_string(),
            content: format!("Body of {}", title),
        }
    }

    #[test]
    fn test_first_occurrence_wins() {
        let curated = curate(&[raw("AI wins award", "desc A"), raw("ai WINS award", " desc B")]);

        assert_eq!(curated.len(), 1);
        assert_eq!(curated[0].title, "AI wins award");
        assert_eq!(curated[0].summary, "desc A");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored_for_dedup() {
        let curated = curate(&[raw("Rates hold", "a"), raw("  rates hold\n", "b")]);
        assert_eq!(curated.len(), 1);
        assert_eq!(curated[0].summary, "a");
    }

    #[test]
    fn test_blank_titles_are_skipped() {
        let curated = curate(&[raw("", "a"), raw("   ", "b"), raw("Kept", "c")]);
        assert_eq!(curated.len(), 1);
        assert_eq!(curated[0].title, "Kept");
    }

    #[test]
    fn test_long_description_is_truncated_with_marker() {
        let curated = curate(&[raw("Long", &"x".repeat(250))]);
        assert_eq!(curated[0].summary, format!("{}...", "x".repeat(200)));
    }

    #[test]
    fn test_description_at_limit_is_verbatim() {
        let exact = "y".repeat(200);
        let curated = curate(&[raw("Exact", &exact), raw("Empty", "")]);
        assert_eq!(curated[0].summary, exact);
        assert_eq!(curated[1].summary, "");
    }

    #[test]
    fn test_full_content_is_retained() {
        let mut article = raw("Deep dive", &"z".repeat(300));
        article.content = "c".repeat(5000);
        let curated = curate(&[article]);
        assert_eq!(curated[0].content.len(), 5000);
        assert_eq!(curated[0].published, "2024-05-01T10:00:00Z");
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(curate(&[]).is_empty());
    }
}
