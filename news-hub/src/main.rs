use anyhow::{anyhow, bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use news_hub::request::DEFAULT_NUM_ARTICLES;
use news_hub::topics::{find_topic, TOPICS};
use news_hub::{
    ArticleSource, ExplainRequest, Explainer, Explanation, FixedArticleSource, GenerateRequest,
    GenerationConfig, NewsApiConfig, NewsApiSource, PipelineBuilder, PipelineConfig,
    PipelineReport, TextGenerationClient,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "newshub", version, about = "Fetch, curate and write up news for a query")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true, global = true)]
    news_api_key: Option<String>,

    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true, global = true)]
    groq_api_key: Option<String>,

    /// Chat-completions model name
    #[arg(long, env = "NEWSHUB_MODEL", global = true)]
    model: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the full pipeline for a query or catalogue topic
    Generate {
        #[arg(short, long, conflicts_with = "topic", required_unless_present = "topic")]
        query: Option<String>,

        /// Topic slug or label from `newshub topics`
        #[arg(short, long)]
        topic: Option<String>,

        #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_ARTICLES)]
        count: usize,

        /// Read raw articles from a JSON file instead of calling NewsAPI
        #[arg(long)]
        articles_file: Option<PathBuf>,

        /// Also write the JSON report to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },
    /// Explain one article in plain terms
    Explain {
        #[arg(long, requires = "content", conflicts_with = "report")]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        /// JSON report written by `generate --save`
        #[arg(long, requires = "index")]
        report: Option<PathBuf>,

        /// 1-based article number within the report
        #[arg(long)]
        index: Option<usize>,
    },
    /// List the topic catalogue
    Topics,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generation_client(cli: &Cli) -> TextGenerationClient {
    let mut config = GenerationConfig::default().with_api_key(cli.groq_api_key.clone());
    if let Some(ref model) = cli.model {
        config = config.with_model(model);
    }
    TextGenerationClient::from_config(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!("Parsed arguments: {:?}", cli.command);

    match &cli.command {
        Command::Generate {
            query,
            topic,
            count,
            articles_file,
            save,
        } => {
            let query = resolve_query(query.as_deref(), topic.as_deref())?;
            let request = GenerateRequest::new(&query, *count);
            request.validate()?;

            let source: Arc<dyn ArticleSource> = match articles_file {
                Some(path) => Arc::new(FixedArticleSource::from_json_file(path)?),
                None => Arc::new(NewsApiSource::new(
                    NewsApiConfig::default().with_api_key(cli.news_api_key.clone()),
                )?),
            };

            let pipeline = PipelineBuilder::new()
                .source(source)
                .client(generation_client(&cli))
                .config(PipelineConfig::default())
                .build()?;

            let report = pipeline.run_report(&request.query, request.num_articles).await;

            if let Some(path) = save {
                std::fs::write(path, serde_json::to_string_pretty(&report)?)
                    .with_context(|| format!("writing report to {}", path.display()))?;
                info!("Saved report to {}", path.display());
            }

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => print_report(&report),
            }
        }
        Command::Explain {
            title,
            content,
            report,
            index,
        } => {
            let request = match (report, index) {
                (Some(path), Some(index)) => explain_request_from_report(path, *index)?,
                _ => ExplainRequest {
                    title: title.clone().unwrap_or_default(),
                    content: content.clone().unwrap_or_default(),
                },
            };
            request.validate()?;

            let explainer = Explainer::new(generation_client(&cli));
            let explanation = Explanation {
                explanation_text: explainer.explain(&request.title, &request.content).await,
                title: request.title,
            };

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&explanation)?),
                OutputFormat::Text => println!("{}\n\n{}", explanation.title, explanation.explanation_text),
            }
        }
        Command::Topics => match cli.format {
            OutputFormat::Json => {
                let topics: serde_json::Map<String, serde_json::Value> = TOPICS
                    .iter()
                    .map(|t| (t.label.to_string(), serde_json::Value::String(t.query.to_string())))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&topics)?);
            }
            OutputFormat::Text => {
                for topic in TOPICS {
                    println!("{:<15} {:<26} {}", topic.slug, topic.label, topic.query);
                }
            }
        },
    }

    Ok(())
}

fn resolve_query(query: Option<&str>, topic: Option<&str>) -> anyhow::Result<String> {
    match (query, topic) {
        (Some(query), _) => Ok(query.to_string()),
        (None, Some(name)) => find_topic(name)
            .map(|topic| topic.query.to_string())
            .ok_or_else(|| anyhow!("Unknown topic '{}'; see `newshub topics`", name)),
        (None, None) => bail!("Either --query or --topic is required"),
    }
}

fn explain_request_from_report(path: &Path, index: usize) -> anyhow::Result<ExplainRequest> {
    let data = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let report: PipelineReport = serde_json::from_str(&data)?;

    let article = index
        .checked_sub(1)
        .and_then(|i| report.curated_articles.get(i))
        .ok_or_else(|| anyhow!("Report has {} articles; no article #{}", report.curated_article_count, index))?;

    Ok(ExplainRequest {
        title: article.title.clone(),
        content: article.content.clone(),
    })
}

fn print_report(report: &PipelineReport) {
    println!("Query: {}", report.query);
    println!("Curated articles: {}", report.curated_article_count);
    for (i, article) in report.curated_articles.iter().enumerate() {
        println!("{:>3}. {} ({})", i + 1, article.title, article.source);
        if !article.url.is_empty() {
            println!("     {}", article.url);
        }
    }

    for (heading, body) in [
        ("Blog", &report.blog_text),
        ("Summary", &report.summary_text),
        ("Categories", &report.categories_text),
        ("Trends", &report.trends_text),
    ] {
        println!("\n== {} ==\n{}", heading, body);
    }
}
