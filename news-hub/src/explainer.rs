use crate::generation::{TextGenerationClient, UNAVAILABLE};
use crate::templates::{render, EXPLAIN_TEMPLATE};
use crate::types::{CuratedArticle, Explanation};
use crate::utils::text::clip;
use tracing::{debug, info};

/// Prompt-size cap on article content
pub const EXPLAIN_CONTENT_MAX_CHARS: usize = 2000;

/// Plain-language explanation of a single article, run outside the main
/// pipeline. Holds only the client, so one explainer can serve any number
/// of articles, including ones retained from earlier runs.
#[derive(Debug, Clone)]
pub struct Explainer {
    client: TextGenerationClient,
}

impl Explainer {
    pub fn new(client: TextGenerationClient) -> Self {
        Self { client }
    }

    pub fn render_prompt(title: &str, content: &str) -> String {
        render(
            EXPLAIN_TEMPLATE,
            &[("title", title), ("content", clip(content, EXPLAIN_CONTENT_MAX_CHARS))],
        )
    }

    pub async fn explain(&self, title: &str, content: &str) -> String {
        if let TextGenerationClient::Unavailable { reason } = &self.client {
            debug!("explain: generation unavailable ({})", reason);
            return UNAVAILABLE.to_string();
        }

        info!("Explaining article: {}", title);
        let prompt = Self::render_prompt(title, content);
        self.client.generate_or_error("explain", &prompt).await
    }

    pub async fn explain_article(&self, article: &CuratedArticle) -> Explanation {
        Explanation {
            title: article.title.clone(),
            explanation_text: self.explain(&article.title, &article.content).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockTextGenerator;
    use std::sync::Arc;

    #[test]
    fn test_content_is_capped_without_marker() {
        let content = "w".repeat(2500);
        let prompt = Explainer::render_prompt("Long read", &content);

        assert!(prompt.contains(&format!("Content: {}\n", "w".repeat(2000))));
        assert!(!prompt.contains(&"w".repeat(2001)));
        assert!(!prompt.contains("w..."));
    }

    #[tokio::test]
    async fn test_unavailable_client_returns_sentinel() {
        let explainer = Explainer::new(TextGenerationClient::unavailable("no key"));
        assert_eq!(explainer.explain("Title", "Body").await, UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_failure_is_inline_error() {
        let generator = MockTextGenerator::echo().fail_when_prompt_contains("Explain this article", "timeout");
        let explainer = Explainer::new(TextGenerationClient::new(Arc::new(generator)));
        assert_eq!(explainer.explain("Title", "Body").await, "Error: timeout");
    }

    #[tokio::test]
    async fn test_explain_article_uses_full_content() {
        let explainer = Explainer::new(TextGenerationClient::new(Arc::new(MockTextGenerator::echo())));
        let article = CuratedArticle {
            title: "Grid upgrade".to_string(),
            summary: "short".to_string(),
            source: "Wire".to_string(),
            url: String::new(),
            published: String::new(),
            content: "Full body text".to_string(),
        };

        let explanation = explainer.explain_article(&article).await;
        assert_eq!(explanation.title, "Grid upgrade");
        assert!(explanation.explanation_text.contains("Title: Grid upgrade\nContent: Full body text"));
    }
}
