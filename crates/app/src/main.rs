use anyhow::Result;
use rewrite::AnswerRewriter;
use benchmark_rewriter::{AppConfig, pipeline};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; variables already set take precedence
    let env_file = dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Some(path) = &env_file {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let config = AppConfig::from_env()?;
    let api_key = config.llm.api_key()?;

    tracing::info!(
        model = %config.llm.model,
        benchmark = %config.input.benchmark_file.display(),
        transcript = %config.input.transcript_file.display(),
        "Starting benchmark rewrite"
    );

    let client = config.llm.client(api_key);
    let answer_rewriter = AnswerRewriter::new(client, config.prompt_config());

    let output = pipeline::run_and_save(&config, &answer_rewriter).await?;
    tracing::info!(rows = output.len(), "Run complete");

    Ok(())
}
