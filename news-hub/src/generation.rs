use crate::generators::ChatCompletionsGenerator;
use crate::types::{GenerationConfig, NewsHubError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Placeholder a stage produces when there is nothing to generate from.
pub const NO_CONTENT: &str = "No content";

/// Placeholder the explainer produces when no generator is configured.
pub const UNAVAILABLE: &str = "AI not initialized";

/// Inline text standing in for a failed generation call.
pub fn error_text(error: &NewsHubError) -> String {
    format!("Error: {}", error)
}

/// Capability that turns a fully rendered prompt into generated text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Text-generation capability as seen by stages: either a live generator
/// or an explicit "not configured" marker decided once at construction.
#[derive(Clone)]
pub enum TextGenerationClient {
    Available(Arc<dyn TextGenerator>),
    Unavailable { reason: String },
}

impl TextGenerationClient {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self::Available(generator)
    }

    pub fn unavailable(reason: &str) -> Self {
        Self::Unavailable {
            reason: reason.to_string(),
        }
    }

    /// Build the chat-completions client, or `Unavailable` when no usable
    /// credential is configured.
    pub fn from_config(config: GenerationConfig) -> Self {
        match config.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                info!("No generation API key configured; generation disabled");
                return Self::unavailable("GROQ_API_KEY not set");
            }
        }

        match ChatCompletionsGenerator::new(config) {
            Ok(generator) => Self::Available(Arc::new(generator)),
            Err(e) => {
                warn!("Failed to build generation client: {}", e);
                Self::unavailable(&e.to_string())
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub async fn generate(&self, prompt: &str) -> Result<String> {
        match self {
            Self::Available(generator) => generator.generate(prompt).await,
            Self::Unavailable { reason } => Err(NewsHubError::MissingCredential(reason.clone())),
        }
    }

    /// Generate, folding any failure into an inline `"Error: ..."` string.
    pub async fn generate_or_error(&self, label: &str, prompt: &str) -> String {
        debug!("{}: sending prompt of {} chars", label, prompt.chars().count());
        match self.generate(prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("{}: generation failed: {}", label, e);
                error_text(&e)
            }
        }
    }
}

impl fmt::Debug for TextGenerationClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available(_) => f.write_str("TextGenerationClient::Available"),
            Self::Unavailable { reason } => f
                .debug_struct("TextGenerationClient::Unavailable")
                .field("reason", reason)
                .finish(),
        }
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Echo,
    Fixed(String),
}

/// Deterministic generator for development and testing
#[derive(Debug)]
pub struct MockTextGenerator {
    reply: MockReply,
    response_delay_ms: u64,
    failures: Vec<(String, String)>,
    calls: AtomicUsize,
}

impl MockTextGenerator {
    /// Replies with the prompt itself
    pub fn echo() -> Self {
        Self {
            reply: MockReply::Echo,
            response_delay_ms: 0,
            failures: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_reply(reply: &str) -> Self {
        Self {
            reply: MockReply::Fixed(reply.to_string()),
            ..Self::echo()
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.response_delay_ms = delay_ms;
        self
    }

    /// Fail with `message` whenever the prompt contains `needle`
    pub fn fail_when_prompt_contains(mut self, needle: &str, message: &str) -> Self {
        self.failures.push((needle.to_string(), message.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.response_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.response_delay_ms)).await;
        }

        if let Some((_, message)) = self.failures.iter().find(|(needle, _)| prompt.contains(needle.as_str())) {
            return Err(NewsHubError::General(message.clone()));
        }

        Ok(match &self.reply {
            MockReply::Echo => prompt.to_string(),
            MockReply::Fixed(text) => text.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_blank_key_is_unavailable() {
        assert!(!TextGenerationClient::from_config(GenerationConfig::default()).is_available());
        let blank = GenerationConfig::default().with_api_key(Some("   ".to_string()));
        assert!(!TextGenerationClient::from_config(blank).is_available());
    }

    #[test]
    fn test_configured_key_is_available() {
        let config = GenerationConfig::default().with_api_key(Some("gsk_test".to_string()));
        assert!(TextGenerationClient::from_config(config).is_available());
    }

    #[tokio::test]
    async fn test_failure_becomes_inline_error_text() {
        let generator = MockTextGenerator::echo().fail_when_prompt_contains("boom", "upstream exploded");
        let client = TextGenerationClient::new(Arc::new(generator));

        assert_eq!(client.generate_or_error("test", "boom").await, "Error: upstream exploded");
        assert_eq!(client.generate_or_error("test", "fine").await, "fine");
    }

    #[tokio::test]
    async fn test_unavailable_client_reports_reason_internally() {
        let client = TextGenerationClient::unavailable("GROQ_API_KEY not set");
        let err = client.generate("prompt").await.unwrap_err();
        assert!(matches!(err, NewsHubError::MissingCredential(ref r) if r == "GROQ_API_KEY not set"));
    }
}
