use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use rag_core::{Config, ToolRegistry};
use rag_llm::GeminiProvider;
use rag_orchestrator::{GenerationOrchestrator, GenerationSettings};

mod logging;

use logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "rag-cli")]
#[command(about = "Ask the course materials assistant a question")]
#[command(version)]
struct Cli {
    /// The question to answer
    query: String,

    /// Summary of the previous conversation, if any
    #[arg(long)]
    summary: Option<String>,

    /// Gemini model name (overrides config and AI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Gemini API base URL (overrides config and GEMINI_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Enable debug logging
    #[arg(long, short, env = "DEBUG", default_value = "false")]
    debug: bool,
}

/// Registration point for search tools. None ship with the CLI yet, so the
/// model answers from general knowledge.
fn build_tool_registry() -> ToolRegistry {
    ToolRegistry::new()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let mut config = Config::load().context("failed to load configuration")?;
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(api_base) = cli.api_base {
        config.api_base = api_base;
    }

    log::info!("Model: {}", config.model);
    log::debug!("API base: {}", config.api_base);

    let provider = GeminiProvider::from_config(&config)?;
    let orchestrator =
        GenerationOrchestrator::new(Arc::new(provider), GenerationSettings::from_config(&config));

    let registry = build_tool_registry();
    let tools = registry.descriptors();
    log::debug!("{} tool(s) offered", tools.len());

    let answer = orchestrator
        .generate(&cli.query, cli.summary.as_deref(), &tools, Some(&registry))
        .await;
    println!("{answer}");

    Ok(())
}
