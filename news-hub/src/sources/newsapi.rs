use crate::fetcher::Fetcher;
use crate::traits::ArticleSource;
use crate::types::{NewsApiConfig, NewsHubError, RawArticle, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Deserialize)]
struct EverythingResponse {
    status: String,
    #[serde(default)]
    articles: Vec<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiArticle {
    title: Option<String>,
    description: Option<String>,
    source: Option<NewsApiSourceRef>,
    url: Option<String>,
    published_at: Option<String>,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewsApiSourceRef {
    name: Option<String>,
}

impl From<NewsApiArticle> for RawArticle {
    fn from(article: NewsApiArticle) -> Self {
        let description = non_empty(article.description).unwrap_or_default();
        let content = non_empty(article.content).unwrap_or_else(|| description.clone());

        Self {
            title: article.title.unwrap_or_default().trim().to_string(),
            description,
            source: article
                .source
                .and_then(|s| s.name)
                .unwrap_or_else(|| "Unknown".to_string()),
            url: article.url.unwrap_or_default(),
            published_at: article.published_at.unwrap_or_default(),
            content,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Search source backed by the NewsAPI `everything` endpoint
pub struct NewsApiSource {
    config: NewsApiConfig,
    fetcher: Fetcher,
}

impl NewsApiSource {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let fetcher = Fetcher::new(&config.user_agent, config.timeout_seconds)?;
        Ok(Self { config, fetcher })
    }

    fn search_url(&self, api_key: &str, query: &str, max_articles: usize) -> Result<Url> {
        let endpoint = format!("{}/v2/everything", self.config.base_url);
        let page_size = max_articles.to_string();
        let url = Url::parse_with_params(
            &endpoint,
            &[
                ("q", query),
                ("sortBy", self.config.sort_by.as_str()),
                ("language", self.config.language.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ],
        )?;
        Ok(url)
    }

    fn decode_articles(entries: Vec<serde_json::Value>) -> Vec<RawArticle> {
        let total = entries.len();
        let articles: Vec<RawArticle> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<NewsApiArticle>(entry) {
                Ok(article) => Some(article.into()),
                Err(e) => {
                    debug!("Skipping malformed entry {}: {}", index, e);
                    None
                }
            })
            .collect();

        if articles.len() < total {
            debug!("Decoded {}/{} provider entries", articles.len(), total);
        }
        articles
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    fn source_name(&self) -> String {
        "NewsAPI".to_string()
    }

    async fn fetch(&self, query: &str, max_articles: usize) -> Result<Vec<RawArticle>> {
        let api_key = match self.config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => key,
            _ => return Err(NewsHubError::MissingCredential("NEWS_API_KEY".to_string())),
        };

        let url = self.search_url(api_key, query, max_articles)?;
        let response: EverythingResponse = self.fetcher.get_json(url).await?;

        if response.status != "ok" {
            return Err(NewsHubError::Api {
                status: 200,
                message: response
                    .message
                    .unwrap_or_else(|| format!("provider status '{}'", response.status)),
            });
        }

        let articles = Self::decode_articles(response.articles);
        info!("Fetched {} articles for query '{}'", articles.len(), query);
        Ok(articles)
    }
}
