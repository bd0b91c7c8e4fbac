use crate::fetcher::{truncate_message, Fetcher};
use crate::generation::TextGenerator;
use crate::types::{GenerationConfig, NewsHubError, Result};
use async_trait::async_trait;
use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Generator speaking the OpenAI chat-completions protocol (Groq by default).
/// The prompt is sent as a single user message.
pub struct ChatCompletionsGenerator {
    config: GenerationConfig,
    fetcher: Fetcher,
}

impl ChatCompletionsGenerator {
    pub fn new(config: GenerationConfig) -> Result<Self> {
        let fetcher = Fetcher::new("NewsHub/1.0", config.timeout_seconds)?;
        Ok(Self { config, fetcher })
    }

    fn retry_policy(&self) -> ExponentialBackoff<backoff::SystemClock> {
        let initial = Duration::from_secs(self.config.retry_delay_seconds);
        ExponentialBackoff {
            current_interval: initial,
            initial_interval: initial,
            max_interval: initial * 8,
            multiplier: 2.0,
            max_elapsed_time: Some(Duration::from_secs(self.config.timeout_seconds)),
            ..Default::default()
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<String> {
        let api_key = self.config.api_key.as_deref().unwrap_or_default();
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .fetcher
            .client()
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.fetcher.map_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NewsHubError::Api {
                status: status.as_u16(),
                message: truncate_message(&body),
            });
        }

        let chat: ChatResponse = response.json().await.map_err(|e| NewsHubError::Parse(e.to_string()))?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NewsHubError::Parse("No completion in response".to_string()))
    }
}

fn is_retryable(error: &NewsHubError) -> bool {
    match error {
        NewsHubError::Api { status, .. } => {
            *status == StatusCode::TOO_MANY_REQUESTS.as_u16() || *status >= 500
        }
        NewsHubError::Http(e) => e.is_connect() || e.is_request(),
        _ => false,
    }
}

impl fmt::Debug for ChatCompletionsGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsGenerator")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

#[async_trait]
impl TextGenerator for ChatCompletionsGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let mut backoff = self.retry_policy();
        let mut attempt = 0;

        loop {
            match self.attempt(prompt).await {
                Ok(text) => {
                    debug!("Completion received from {} ({} chars)", self.config.model, text.len());
                    return Ok(text);
                }
                Err(e) if attempt < self.config.max_retries && is_retryable(&e) => {
                    attempt += 1;
                    match backoff.next_backoff() {
                        Some(delay) => {
                            warn!("Generation attempt {} failed ({}), retrying in {:?}", attempt, e, delay);
                            tokio::time::sleep(delay).await;
                        }
                        None => return Err(e),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limits_and_server_errors_are_retried() {
        let api = |status| NewsHubError::Api {
            status,
            message: String::new(),
        };
        assert!(is_retryable(&api(429)));
        assert!(is_retryable(&api(503)));
        assert!(!is_retryable(&api(401)));
        assert!(!is_retryable(&NewsHubError::Parse("bad".to_string())));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GenerationConfig::default().with_api_key(Some("gsk_secret".to_string()));
        let generator = ChatCompletionsGenerator::new(config).unwrap();
        let printed = format!("{:?}", generator);
        assert!(!printed.contains("gsk_secret"));
        assert!(printed.contains("llama-3.3-70b-versatile"));
    }
}
