use crate::types::{NewsHubError, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Thin HTTP layer shared by the provider clients: one configured
/// `reqwest::Client` plus status and body handling.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_seconds);
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()?;

        Ok(Self { client, timeout })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// GET `url` and decode the JSON body.
    ///
    /// A non-success status becomes [`NewsHubError::Api`] carrying the body
    /// text; a transport timeout becomes [`NewsHubError::Timeout`].
    pub async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let start_time = Instant::now();
        // Never log the query string, it may carry credentials
        debug!("GET {}://{}{}", url.scheme(), url.host_str().unwrap_or(""), url.path());

        let response = self.client.get(url).send().await.map_err(|e| self.map_transport(e))?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NewsHubError::Api {
                status: status.as_u16(),
                message: truncate_message(&message),
            });
        }

        let body = response.text().await.map_err(|e| self.map_transport(e))?;
        debug!("Received {} bytes in {:?}", body.len(), start_time.elapsed());

        serde_json::from_str(&body).map_err(|e| NewsHubError::Parse(format!("Malformed response body: {}", e)))
    }

    pub fn map_transport(&self, error: reqwest::Error) -> NewsHubError {
        if error.is_timeout() {
            NewsHubError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            NewsHubError::Http(error)
        }
    }
}

/// Provider error bodies can be whole HTML pages; keep the cause short.
pub fn truncate_message(message: &str) -> String {
    const MAX_CHARS: usize = 300;
    let trimmed = message.trim();
    if trimmed.chars().count() > MAX_CHARS {
        format!("{}...", trimmed.chars().take(MAX_CHARS).collect::<String>())
    } else {
        trimmed.to_string()
    }
}
