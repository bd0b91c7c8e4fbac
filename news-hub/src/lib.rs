pub mod types;
pub mod traits;
pub mod fetcher;
pub mod sources;
pub mod curator;
pub mod generation;
pub mod generators;
pub mod templates;
pub mod stages;
pub mod explainer;
pub mod graph;
pub mod pipeline;
pub mod request;
pub mod topics;
pub mod utils;

pub use types::*;
pub use traits::ArticleSource;
pub use sources::{FixedArticleSource, NewsApiSource};
pub use curator::{curate, Curator};
pub use generation::{MockTextGenerator, TextGenerationClient, TextGenerator, NO_CONTENT, UNAVAILABLE};
pub use generators::ChatCompletionsGenerator;
pub use stages::{GenerationStage, StageRunner};
pub use explainer::Explainer;
pub use graph::{StageGraph, StageId};
pub use pipeline::{NewsPipeline, PipelineBuilder, PipelineContext};
pub use request::{ExplainRequest, GenerateRequest};
