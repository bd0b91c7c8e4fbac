use std::time::Duration;

// Use the interfaces crate for the shared data model
pub use interfaces::defs::{CuratedArticle, Explanation, PipelineReport, RawArticle};

pub const NEWS_API_URL: &str = "https://newsapi.org";
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub language: String,
    pub sort_by: String,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: NEWS_API_URL.to_string(),
            user_agent: "NewsHub/1.0".to_string(),
            timeout_seconds: 10,
            language: "en".to_string(),
            sort_by: "publishedAt".to_string(),
        }
    }
}

impl NewsApiConfig {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: GROQ_API_URL.to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            timeout_seconds: 60,
            max_retries: 2,
            retry_delay_seconds: 1,
        }
    }
}

impl GenerationConfig {
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Upper bound on the Fetch node, applied on top of the source's own timeout.
    pub fetch_timeout_seconds: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_seconds: 10,
        }
    }
}

impl PipelineConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_seconds)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NewsHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, NewsHubError>;
