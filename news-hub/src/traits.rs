use crate::types::{RawArticle, Result};
use async_trait::async_trait;
use tracing::warn;

/// Trait for pulling articles matching a query from a search provider
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Human-readable name for this source
    fn source_name(&self) -> String;

    /// Fetch up to `max_articles` raw articles for `query`, newest first.
    ///
    /// Malformed provider entries are skipped individually; only failures
    /// that affect the whole batch are returned as errors.
    async fn fetch(&self, query: &str, max_articles: usize) -> Result<Vec<RawArticle>>;

    /// Like [`ArticleSource::fetch`], but any failure becomes an empty batch.
    async fn fetch_or_empty(&self, query: &str, max_articles: usize) -> Vec<RawArticle> {
        match self.fetch(query, max_articles).await {
            Ok(articles) => articles,
            Err(e) => {
                warn!("Source {} failed for query '{}': {}", self.source_name(), query, e);
                Vec::new()
            }
        }
    }
}
