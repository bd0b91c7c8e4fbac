use crate::curator::curate;
use crate::generation::{TextGenerationClient, NO_CONTENT};
use crate::graph::{StageGraph, StageId};
use crate::stages::GenerationStage;
use crate::traits::ArticleSource;
use crate::types::{CuratedArticle, NewsHubError, PipelineConfig, PipelineReport, RawArticle, Result};
use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// State of one pipeline run. Owned by the run that created it; every
/// node writes only its own field.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub run_id: Uuid,
    pub query: String,
    pub num_articles: usize,
    pub raw_articles: Vec<RawArticle>,
    pub curated_articles: Vec<CuratedArticle>,
    pub blog: String,
    pub summary: String,
    pub categories: String,
    pub trends: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl PipelineContext {
    pub fn new(query: &str, num_articles: usize) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            query: query.to_string(),
            num_articles,
            raw_articles: Vec::new(),
            curated_articles: Vec::new(),
            blog: String::new(),
            summary: String::new(),
            categories: String::new(),
            trends: String::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn output(&self, stage: GenerationStage) -> &str {
        match stage {
            GenerationStage::Blog => &self.blog,
            GenerationStage::Summary => &self.summary,
            GenerationStage::Categories => &self.categories,
            GenerationStage::Trends => &self.trends,
        }
    }

    fn output_mut(&mut self, stage: GenerationStage) -> &mut String {
        match stage {
            GenerationStage::Blog => &mut self.blog,
            GenerationStage::Summary => &mut self.summary,
            GenerationStage::Categories => &mut self.categories,
            GenerationStage::Trends => &mut self.trends,
        }
    }

    fn apply(&mut self, output: StageOutput) {
        match output {
            StageOutput::Fetched(raw) => self.raw_articles = raw,
            StageOutput::Curated(curated) => self.curated_articles = curated,
            StageOutput::Generated(stage, text) => *self.output_mut(stage) = text,
        }
    }

    /// Snapshot the inputs nodes may read
    fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            query: self.query.clone(),
            num_articles: self.num_articles,
            raw_articles: Arc::new(self.raw_articles.clone()),
            curated_articles: Arc::new(self.curated_articles.clone()),
        }
    }

    pub fn into_report(self) -> PipelineReport {
        PipelineReport {
            query: self.query,
            curated_article_count: self.curated_articles.len(),
            curated_articles: self.curated_articles,
            blog_text: self.blog,
            summary_text: self.summary,
            categories_text: self.categories,
            trends_text: self.trends,
        }
    }
}

/// Read-only view handed to node tasks
struct ContextSnapshot {
    query: String,
    num_articles: usize,
    raw_articles: Arc<Vec<RawArticle>>,
    curated_articles: Arc<Vec<CuratedArticle>>,
}

/// What a node contributes to the context
#[derive(Debug)]
enum StageOutput {
    Fetched(Vec<RawArticle>),
    Curated(Vec<CuratedArticle>),
    Generated(GenerationStage, String),
}

impl StageOutput {
    /// Stand-in for a node that ended without reporting
    fn fallback(node: StageId, reason: &str) -> Self {
        match generation_stage(node) {
            Some(stage) => StageOutput::Generated(stage, format!("Error: {}", reason)),
            None if node == StageId::Fetch => StageOutput::Fetched(Vec::new()),
            None => StageOutput::Curated(Vec::new()),
        }
    }
}

fn generation_stage(node: StageId) -> Option<GenerationStage> {
    match node {
        StageId::Blog => Some(GenerationStage::Blog),
        StageId::Summary => Some(GenerationStage::Summary),
        StageId::Categories => Some(GenerationStage::Categories),
        StageId::Trends => Some(GenerationStage::Trends),
        StageId::Fetch | StageId::Curate => None,
    }
}

/// Fetch -> Curate -> {Blog, Summary, Categories, Trends}.
///
/// Nodes whose dependencies are satisfied run concurrently as spawned
/// tasks. A run never fails: every degradation ends up as an empty list,
/// a [`NO_CONTENT`] placeholder or an `"Error: ..."` string.
pub struct NewsPipeline {
    source: Arc<dyn ArticleSource>,
    client: TextGenerationClient,
    graph: StageGraph,
    config: PipelineConfig,
}

impl NewsPipeline {
    pub fn new(source: Arc<dyn ArticleSource>, client: TextGenerationClient) -> Self {
        Self {
            source,
            client,
            graph: StageGraph::default(),
            config: PipelineConfig::default(),
        }
    }

    pub fn client(&self) -> &TextGenerationClient {
        &self.client
    }

    pub async fn run(&self, query: &str, num_articles: usize) -> PipelineContext {
        let context = PipelineContext::new(query, num_articles);
        let span = info_span!("pipeline", run_id = %context.run_id, query = %query);
        self.execute(context).instrument(span).await
    }

    pub async fn run_report(&self, query: &str, num_articles: usize) -> PipelineReport {
        self.run(query, num_articles).await.into_report()
    }

    async fn execute(&self, mut context: PipelineContext) -> PipelineContext {
        let start_time = Instant::now();
        let mut completed = HashSet::new();

        info!(
            "Starting pipeline for {} articles via {}",
            context.num_articles,
            self.source.source_name()
        );

        loop {
            let wave = self.graph.ready(&completed);
            if wave.is_empty() {
                break;
            }
            self.run_wave(&mut context, &wave).await;
            completed.extend(wave);
        }

        // Only reachable with a cyclic custom graph
        for node in StageId::ALL.iter().filter(|node| !completed.contains(*node)) {
            warn!("Stage {} never became ready", node);
            context.apply(StageOutput::fallback(*node, "stage dependencies never completed"));
        }

        context.finished_at = Some(Utc::now());
        info!(
            "Pipeline finished in {:?}: {} raw, {} curated",
            start_time.elapsed(),
            context.raw_articles.len(),
            context.curated_articles.len()
        );
        context
    }

    async fn run_wave(&self, context: &mut PipelineContext, wave: &[StageId]) {
        debug!("Running wave: {:?}", wave);
        let snapshot = context.snapshot();
        let (sender, mut receiver) = mpsc::unbounded_channel();

        for &node in wave {
            let task = self.node_task(node, &snapshot);
            let sender = sender.clone();
            tokio::spawn(
                async move {
                    let started = Instant::now();
                    let output = task.await;
                    debug!("Stage {} finished in {:?}", node, started.elapsed());
                    if sender.send((node, output)).is_err() {
                        warn!("Pipeline dropped before stage {} reported", node);
                    }
                }
                .instrument(Span::current()),
            );
        }
        drop(sender);

        let mut reported = HashSet::new();
        while let Some((node, output)) = receiver.recv().await {
            reported.insert(node);
            context.apply(output);
        }

        for node in wave.iter().filter(|node| !reported.contains(*node)) {
            warn!("Stage {} ended without output", node);
            context.apply(StageOutput::fallback(*node, "stage task aborted"));
        }
    }

    fn node_task(&self, node: StageId, snapshot: &ContextSnapshot) -> BoxFuture<'static, StageOutput> {
        match node {
            StageId::Fetch => self.fetch_task(snapshot),
            StageId::Curate => {
                let raw = snapshot.raw_articles.clone();
                async move { StageOutput::Curated(curate(&raw)) }.boxed()
            }
            StageId::Blog => self.generation_task(GenerationStage::Blog, snapshot),
            StageId::Summary => self.generation_task(GenerationStage::Summary, snapshot),
            StageId::Categories => self.generation_task(GenerationStage::Categories, snapshot),
            StageId::Trends => self.generation_task(GenerationStage::Trends, snapshot),
        }
    }

    fn fetch_task(&self, snapshot: &ContextSnapshot) -> BoxFuture<'static, StageOutput> {
        let source = self.source.clone();
        let query = snapshot.query.clone();
        let num_articles = snapshot.num_articles;
        let timeout = self.config.fetch_timeout();

        async move {
            match tokio::time::timeout(timeout, source.fetch_or_empty(&query, num_articles)).await {
                Ok(articles) => StageOutput::Fetched(articles),
                Err(_) => {
                    warn!("Source {} timed out after {:?}", source.source_name(), timeout);
                    StageOutput::Fetched(Vec::new())
                }
            }
        }
        .boxed()
    }

    fn generation_task(&self, stage: GenerationStage, snapshot: &ContextSnapshot) -> BoxFuture<'static, StageOutput> {
        let runner = stage.runner();
        let curated = snapshot.curated_articles.clone();
        let client = self.client.clone();

        async move { StageOutput::Generated(stage, runner.run(&curated, &client).await) }.boxed()
    }
}

/// Pipeline builder for easier configuration
pub struct PipelineBuilder {
    source: Option<Arc<dyn ArticleSource>>,
    client: TextGenerationClient,
    graph: StageGraph,
    config: PipelineConfig,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            client: TextGenerationClient::unavailable("no generator configured"),
            graph: StageGraph::default(),
            config: PipelineConfig::default(),
        }
    }

    pub fn source(mut self, source: Arc<dyn ArticleSource>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn client(mut self, client: TextGenerationClient) -> Self {
        self.client = client;
        self
    }

    pub fn graph(mut self, graph: StageGraph) -> Self {
        self.graph = graph;
        self
    }

    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<NewsPipeline> {
        let source = self
            .source
            .ok_or_else(|| NewsHubError::General("Pipeline needs an article source".to_string()))?;
        self.graph.waves()?;

        if !self.client.is_available() {
            info!("Generation unavailable; stages will produce '{}'", NO_CONTENT);
        }

        Ok(NewsPipeline {
            source,
            client: self.client,
            graph: self.graph,
            config: self.config,
        })
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
