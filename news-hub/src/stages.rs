use crate::generation::{TextGenerationClient, NO_CONTENT};
use crate::templates::{
    blog_articles, render, summary_articles, title_list, BLOG_TEMPLATE, CATEGORIES_TEMPLATE,
    SUMMARY_TEMPLATE, TRENDS_TEMPLATE,
};
use crate::types::CuratedArticle;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// A content-generation step over the curated article list
#[async_trait]
pub trait StageRunner: Send + Sync {
    /// Get the name of this stage
    fn stage_name(&self) -> &'static str;

    /// Render this stage's prompt for `curated`
    fn render_prompt(&self, curated: &[CuratedArticle]) -> String;

    /// Produce this stage's output. Never fails: an empty list or a missing
    /// generator yields [`NO_CONTENT`], a failed call an `"Error: ..."` string.
    async fn run(&self, curated: &[CuratedArticle], client: &TextGenerationClient) -> String {
        if curated.is_empty() {
            debug!("{}: no curated articles", self.stage_name());
            return NO_CONTENT.to_string();
        }

        if let TextGenerationClient::Unavailable { reason } = client {
            debug!("{}: generation unavailable ({})", self.stage_name(), reason);
            return NO_CONTENT.to_string();
        }

        let prompt = self.render_prompt(curated);
        let output = client.generate_or_error(self.stage_name(), &prompt).await;
        info!("{}: produced {} chars", self.stage_name(), output.chars().count());
        output
    }
}

/// Long-form blog post over all articles
pub struct BlogStage;

impl StageRunner for BlogStage {
    fn stage_name(&self) -> &'static str {
        "blog"
    }

    fn render_prompt(&self, curated: &[CuratedArticle]) -> String {
        render(BLOG_TEMPLATE, &[("articles", &blog_articles(curated))])
    }
}

/// Short executive summary
pub struct SummaryStage;

impl StageRunner for SummaryStage {
    fn stage_name(&self) -> &'static str {
        "summary"
    }

    fn render_prompt(&self, curated: &[CuratedArticle]) -> String {
        render(SUMMARY_TEMPLATE, &[("articles", &summary_articles(curated))])
    }
}

/// Groups article titles into topical categories
pub struct CategoriesStage;

impl StageRunner for CategoriesStage {
    fn stage_name(&self) -> &'static str {
        "categories"
    }

    fn render_prompt(&self, curated: &[CuratedArticle]) -> String {
        render(CATEGORIES_TEMPLATE, &[("articles", &title_list(curated))])
    }
}

/// Trend analysis over article titles
pub struct TrendsStage;

impl StageRunner for TrendsStage {
    fn stage_name(&self) -> &'static str {
        "trends"
    }

    fn render_prompt(&self, curated: &[CuratedArticle]) -> String {
        render(TRENDS_TEMPLATE, &[("articles", &title_list(curated))])
    }
}

/// Which output slot a generation stage fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationStage {
    Blog,
    Summary,
    Categories,
    Trends,
}

impl GenerationStage {
    pub const ALL: [GenerationStage; 4] = [
        GenerationStage::Blog,
        GenerationStage::Summary,
        GenerationStage::Categories,
        GenerationStage::Trends,
    ];

    pub fn runner(&self) -> Arc<dyn StageRunner> {
        match self {
            GenerationStage::Blog => Arc::new(BlogStage),
            GenerationStage::Summary => Arc::new(SummaryStage),
            GenerationStage::Categories => Arc::new(CategoriesStage),
            GenerationStage::Trends => Arc::new(TrendsStage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::MockTextGenerator;

    fn article(title: &str) -> CuratedArticle {
        CuratedArticle {
            title: title.to_string(),
            summary: format!("About {}", title),
            source: "Wire".to_string(),
            url: String::new(),
            published: String::new(),
            content: String::new(),
        }
    }

    fn echo_client() -> TextGenerationClient {
        TextGenerationClient::new(Arc::new(MockTextGenerator::echo()))
    }

    #[tokio::test]
    async fn test_empty_list_short_circuits() {
        let generator = Arc::new(MockTextGenerator::echo());
        let client = TextGenerationClient::new(generator.clone());

        for stage in GenerationStage::ALL {
            assert_eq!(stage.runner().run(&[], &client).await, NO_CONTENT);
        }
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unavailable_client_short_circuits() {
        let client = TextGenerationClient::unavailable("no key");
        let output = BlogStage.run(&[article("Chips rally")], &client).await;
        assert_eq!(output, NO_CONTENT);
    }

    #[tokio::test]
    async fn test_blog_prompt_embeds_source_and_summary() {
        let output = BlogStage.run(&[article("Chips rally")], &echo_client()).await;
        assert!(output.starts_with("Write a comprehensive"));
        assert!(output.contains("1. Chips rally (Wire)\nAbout Chips rally"));
        assert!(!output.contains("{articles}"));
    }

    #[tokio::test]
    async fn test_summary_prompt_inlines_summary() {
        let output = SummaryStage.run(&[article("Chips rally")], &echo_client()).await;
        assert!(output.contains("1. Chips rally: About Chips rally"));
    }

    #[tokio::test]
    async fn test_title_only_stages_omit_summary() {
        let curated = [article("Chips rally"), article("Rates hold")];
        let client = echo_client();
        let outputs = [
            CategoriesStage.run(&curated, &client).await,
            TrendsStage.run(&curated, &client).await,
        ];
        for output in outputs {
            assert!(output.contains("- Chips rally\n- Rates hold"));
            assert!(!output.contains("About Chips rally"));
        }
    }

    #[tokio::test]
    async fn test_generation_failure_is_inline() {
        let generator = MockTextGenerator::echo().fail_when_prompt_contains("Maximum 5 categories", "quota exceeded");
        let client = TextGenerationClient::new(Arc::new(generator));
        let output = CategoriesStage.run(&[article("Chips rally")], &client).await;
        assert_eq!(output, "Error: quota exceeded");
    }

    #[tokio::test]
    async fn test_multibyte_output_is_returned_intact() {
        let client = TextGenerationClient::new(Arc::new(MockTextGenerator::with_reply("Résumé: ünïcödé 📰")));
        let output = TrendsStage.run(&[article("Chips rally")], &client).await;
        assert_eq!(output, "Résumé: ünïcödé 📰");
        assert_eq!(output.chars().count(), 17);
    }
}
