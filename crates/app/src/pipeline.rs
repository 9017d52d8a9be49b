use anyhow::{Context, Result};
use extract::RewrittenPair;
use rewrite::{AnswerRewriter, TextGenerator};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::output::OutputDocument;

/// Extract, filter and rewrite every benchmark pair into an output table.
///
/// Nothing is written here; a failed rewrite aborts the whole run.
pub async fn run<G: TextGenerator>(
    config: &AppConfig,
    rewriter: &AnswerRewriter<G>,
) -> Result<OutputDocument> {
    let input = &config.input;

    let pairs = extract::extract_qa_from_file(&input.benchmark_file, &input.heading)
        .await
        .context("Failed to extract benchmark questions")?;
    info!(
        file = %input.benchmark_file.display(),
        pairs = pairs.len(),
        "Benchmark pairs extracted"
    );

    let style = extract::read_transcript_style(&input.transcript_file)
        .await
        .context("Failed to read transcript style")?;
    info!(
        file = %input.transcript_file.display(),
        chars = style.as_str().len(),
        "Transcript style loaded"
    );

    let mut output = OutputDocument::new(config.output.title.as_str());

    for pair in pairs {
        if !pair.question_contains(&input.question_filter) {
            debug!(question = %pair.question, "Skipping row without question marker");
            continue;
        }

        let rewritten = rewriter
            .rewrite_answer(&pair.question, &pair.answer, &style)
            .await?;

        println!("rewrite answer");
        println!("{}", rewritten);

        output.push(RewrittenPair::new(pair.question, rewritten));
    }

    Ok(output)
}

/// Run the pipeline and persist the result to the configured output file.
pub async fn run_and_save<G: TextGenerator>(
    config: &AppConfig,
    rewriter: &AnswerRewriter<G>,
) -> Result<OutputDocument> {
    let output = run(config, rewriter).await?;
    output.save(&config.output.file).await?;

    println!("✅ New DOCX file created: {}", config.output.file.display());
    Ok(output)
}
