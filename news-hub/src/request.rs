use crate::types::{NewsHubError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NUM_ARTICLES: usize = 15;
pub const MAX_NUM_ARTICLES: usize = 50;

fn default_num_articles() -> usize {
    DEFAULT_NUM_ARTICLES
}

/// Caller-facing request for a full pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub query: String,
    #[serde(default = "default_num_articles")]
    pub num_articles: usize,
}

impl GenerateRequest {
    pub fn new(query: &str, num_articles: usize) -> Self {
        Self {
            query: query.to_string(),
            num_articles,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.query.trim().is_empty() {
            return Err(NewsHubError::InvalidRequest("Query cannot be empty".to_string()));
        }
        if !(1..=MAX_NUM_ARTICLES).contains(&self.num_articles) {
            return Err(NewsHubError::InvalidRequest(format!(
                "Articles must be between 1 and {}",
                MAX_NUM_ARTICLES
            )));
        }
        Ok(())
    }
}

/// Caller-facing request to explain one article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainRequest {
    pub title: String,
    pub content: String,
}

impl ExplainRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(NewsHubError::InvalidRequest("Title cannot be empty".to_string()));
        }
        if self.content.trim().is_empty() {
            return Err(NewsHubError::InvalidRequest("Content cannot be empty".to_string()));
        }
        Ok(())
    }
}
