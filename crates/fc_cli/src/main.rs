use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use fc_core::config::{self, Settings};
use fc_core::{FallacyCatalog, Recency};
use fc_inference::{AnalysisConfig, FormatPolicy, ModelConfig, ModelKind, SummaryConfig};
use fc_news::{FallacyPipeline, HttpPageFetcher, PipelineConfig, RetrievalConfig, SerperNewsSearch};
use fc_web::{AppState, WebConfig};
use serde_json::json;
use tracing::info;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Find a news article, summarize it and flag its fallacies", long_about = None)]
struct Cli {
    /// CSV file with fallacy names and definitions (defaults to the bundled catalog)
    #[arg(long, global = true)]
    fallacies: Option<PathBuf>,
    #[arg(long, global = true, default_value = "openai", help = "Model to use for inference. Available models: openai (default), echo")]
    model: ModelKind,
    /// Overrides the backend model name (e.g. gpt-4.1-mini)
    #[arg(long, global = true)]
    model_name: Option<String>,
    /// Maximum article characters passed to the summarizer
    #[arg(long, global = true, default_value_t = fc_news::retriever::DEFAULT_MAX_ARTICLE_CHARS)]
    max_article_chars: usize,
    /// News recency window (e.g. 24h, 1w, 1m, 1y)
    #[arg(long, global = true, default_value = "1m")]
    recency: Recency,
    /// Which search hit to analyze; 0 is the top result
    #[arg(long, global = true, default_value_t = 0)]
    result_index: usize,
    #[arg(long, global = true, default_value_t = 5)]
    summary_sentences: usize,
    #[arg(long, global = true, default_value_t = 2)]
    max_fallacies: usize,
    /// What to do when model output ignores the requested format: off, warn, enforce
    #[arg(long, global = true, default_value = "warn")]
    format_policy: FormatPolicy,
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API
    Serve {
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,
        /// Return upstream error messages to clients
        #[arg(long)]
        expose_errors: bool,
        /// Serve the front page from this directory instead of the bundled one
        #[arg(long, env = "FRONTEND_DIR")]
        frontend_dir: Option<PathBuf>,
    },
    /// Analyze one topic and print the JSON result
    Check {
        topic: String,
        #[arg(long)]
        pretty: bool,
    },
    /// Print the loaded fallacy catalog
    Fallacies,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            retrieval: RetrievalConfig {
                recency: self.recency,
                result_index: self.result_index,
                max_article_chars: self.max_article_chars,
                ..Default::default()
            },
            summary: SummaryConfig {
                sentences: self.summary_sentences,
            },
            analysis: AnalysisConfig {
                max_fallacies: self.max_fallacies,
            },
            format_policy: self.format_policy,
        }
    }
}

fn load_catalog(path: Option<&PathBuf>) -> anyhow::Result<FallacyCatalog> {
    let catalog = match path {
        Some(path) => FallacyCatalog::load(path)
            .with_context(|| format!("failed to load fallacies from {}", path.display()))?,
        None => FallacyCatalog::builtin().context("bundled fallacy catalog is invalid")?,
    };
    info!("📚 Loaded {} fallacies", catalog.len());
    Ok(catalog)
}

fn build_pipeline(cli: &Cli) -> anyhow::Result<FallacyPipeline> {
    let settings = Settings::from_env(cli.model.needs_api_key())?;

    let catalog_path = cli.fallacies.clone().or_else(|| settings.fallacies_path.clone());
    let catalog = Arc::new(load_catalog(catalog_path.as_ref())?);

    let model = fc_inference::create_model(&ModelConfig {
        kind: cli.model,
        api_key: settings.openai_api_key.clone(),
        base_url: settings.openai_base_url.clone(),
        model_name: cli.model_name.clone().or_else(|| settings.openai_model.clone()),
        ..Default::default()
    })?;
    let search = Arc::new(SerperNewsSearch::new(&settings.serper_api_key)?);
    let fetcher = Arc::new(HttpPageFetcher::new()?);

    let pipeline = FallacyPipeline::new(search, fetcher, model, catalog, cli.pipeline_config());
    info!("🦗 Pipeline ready: {:?}", pipeline);
    Ok(pipeline)
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        Commands::Serve {
            bind,
            expose_errors,
            frontend_dir,
        } => {
            let pipeline = build_pipeline(&cli)?;
            let app = fc_web::create_app(AppState {
                pipeline: Arc::new(pipeline),
                config: WebConfig {
                    expose_errors: *expose_errors,
                    frontend_dir: frontend_dir.clone(),
                },
            });
            fc_web::serve(*bind, app).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { topic, pretty } => {
            let pipeline = build_pipeline(&cli)?;
            let (value, code) = match pipeline.run(topic).await {
                Ok(result) => (serde_json::to_value(&result)?, ExitCode::SUCCESS),
                Err(err) => (json!({ "error": err.to_string() }), ExitCode::FAILURE),
            };
            let out = if *pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            println!("{}", out);
            Ok(code)
        }
        Commands::Fallacies => {
            let path = cli.fallacies.clone().or_else(config::fallacies_path_from_env);
            let catalog = load_catalog(path.as_ref())?;
            for entry in catalog.iter() {
                println!("{}: {}", entry.name, entry.definition);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
