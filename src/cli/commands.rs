//! CLI command definitions for debate-coach.
//!
//! `serve` runs the HTTP backend; `analyze` runs a single analysis and
//! prints the result.

use crate::analysis::{AnalysisMode, AnalysisRequest, Analyzer, AnalyzerSettings};
use crate::config::AppConfig;
use crate::llm::OpenRouterProvider;
use crate::server::{self, AppState};
use clap::Parser;
use std::sync::Arc;
use tracing::{info, warn};

/// Debate preparation assistant backed by an LLM API.
#[derive(Parser)]
#[command(name = "debate-coach")]
#[command(about = "Generate counterarguments and detect logical fallacies for debate topics")]
#[command(version)]
#[command(
    long_about = "debate-coach serves a small web app that turns a debate topic (and an optional position) into counterarguments or a fallacy analysis.\n\nIf the remote model is unavailable or its answer looks truncated, a built-in answer is returned instead.\n\nExample usage:\n  debate-coach serve --port 8000\n  debate-coach analyze --topic \"School uniforms\" --mode fallacies"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),

    /// Analyze one topic and print the result.
    #[command(alias = "run")]
    Analyze(AnalyzeArgs),
}

/// Arguments for `debate-coach serve`.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind. Overrides DEBATE_HOST.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind. Overrides DEBATE_PORT.
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for `debate-coach analyze`.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Debate topic.
    #[arg(short, long)]
    pub topic: String,

    /// Position or argument to analyze.
    #[arg(short, long)]
    pub perspective: Option<String>,

    /// Analysis mode (counterarguments or fallacies).
    #[arg(short, long, default_value = "counterarguments")]
    pub mode: String,

    /// OpenRouter API key. Falls back to OPENROUTER_API_KEY.
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model to use. Falls back to DEBATE_MODEL.
    #[arg(long)]
    pub model: Option<String>,
}

/// Parse CLI arguments and return the Cli struct.
///
/// This allows main.rs to access CLI arguments (like log_level) before running commands.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Serve(args) => run_serve_command(args).await,
        Commands::Analyze(args) => run_analyze_command(args).await,
    }
}

/// Build the analyzer and the provider from configuration.
///
/// Returns the analyzer together with whether an API key is configured.
fn build_analyzer(config: &AppConfig) -> anyhow::Result<(Arc<Analyzer>, bool)> {
    let provider = OpenRouterProvider::from_config(config)?;

    if provider.has_api_key() {
        info!(
            api_key = %provider.api_key_masked(),
            model = %provider.default_model(),
            base_url = %provider.base_url(),
            "Remote model configured"
        );
    } else {
        warn!("OPENROUTER_API_KEY is not set; every request will use the built-in answers");
    }

    let has_key = provider.has_api_key();
    let analyzer = Analyzer::new(Arc::new(provider), AnalyzerSettings::from(config));
    Ok((Arc::new(analyzer), has_key))
}

async fn run_serve_command(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let (analyzer, has_key) = build_analyzer(&config)?;
    server::serve(&config.bind_addr(), AppState::new(analyzer, has_key)).await
}

async fn run_analyze_command(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(key) = args.api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(key);
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    config.validate()?;

    if args.mode.parse::<AnalysisMode>().is_err() {
        let modes: Vec<_> = AnalysisMode::all().iter().map(|m| m.as_str()).collect();
        anyhow::bail!(
            "Invalid mode '{}'. Expected one of: {}",
            args.mode,
            modes.join(", ")
        );
    }

    let (analyzer, _) = build_analyzer(&config)?;
    let request = AnalysisRequest::new(args.topic, args.perspective.as_deref(), args.mode);
    let response = analyzer.analyze(request).await?;

    println!("{}", response.result);
    Ok(())
}
