use crate::traits::ArticleSource;
use crate::types::{NewsHubError, RawArticle, Result};
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Source that serves a preset list of articles.
///
/// Used for offline runs over a saved article dump and as a stand-in
/// provider in tests (optionally slow or failing).
#[derive(Debug, Clone)]
pub struct FixedArticleSource {
    name: String,
    articles: Vec<RawArticle>,
    delay: Option<Duration>,
    failure: Option<String>,
}

impl FixedArticleSource {
    pub fn new(articles: Vec<RawArticle>) -> Self {
        Self {
            name: "Fixed".to_string(),
            articles,
            delay: None,
            failure: None,
        }
    }

    /// Load a JSON array of raw articles from disk
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let articles: Vec<RawArticle> = serde_json::from_str(&data)?;
        info!("Loaded {} articles from {}", articles.len(), path.display());

        Ok(Self::new(articles).with_name(&format!("File ({})", path.display())))
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }
}

#[async_trait]
impl ArticleSource for FixedArticleSource {
    fn source_name(&self) -> String {
        self.name.clone()
    }

    async fn fetch(&self, _query: &str, max_articles: usize) -> Result<Vec<RawArticle>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(ref message) = self.failure {
            return Err(NewsHubError::General(message.clone()));
        }

        Ok(self.articles.iter().take(max_articles).cloned().collect())
    }
}
