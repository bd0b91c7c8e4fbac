use serde::{Deserialize, Serialize};

/// An article as delivered by a search provider, before curation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: String,
    pub description: String,
    pub source: String,
    pub url: String,
    /// Provider-native timestamp, kept verbatim.
    pub published_at: String,
    /// Full body; providers that omit it get the description instead.
    pub content: String,
}

/// A deduplicated article ready to be rendered into prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedArticle {
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub published: String,
    pub content: String,
}

/// Aggregated outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub query: String,
    pub curated_article_count: usize,
    pub curated_articles: Vec<CuratedArticle>,
    pub blog_text: String,
    pub summary_text: String,
    pub categories_text: String,
    pub trends_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub title: String,
    pub explanation_text: String,
}

// Object style note:
// These records are plain data shared between the pipeline crate and
// whatever surface presents the results (CLI today). Nothing in here
// performs I/O, and a `CuratedArticle` is never mutated once produced;
// callers that want to explain an article later keep their own copy.
