pub mod dates;
pub mod llm;
pub mod prompt;

pub use dates::random_date_2025;
pub use llm::{OpenAiClient, TextGenerator};
pub use prompt::PromptConfig;

use anyhow::{Context, Result};
use extract::StyleSample;
use tracing::{debug, info};

pub struct AnswerRewriter<G: TextGenerator> {
    generator: G,
    prompt: PromptConfig,
}

impl<G: TextGenerator> AnswerRewriter<G> {
    pub fn new(generator: G, prompt: PromptConfig) -> Self {
        Self { generator, prompt }
    }

    /// Rewrite one benchmark answer in the voice of the style sample.
    ///
    /// Every call draws a fresh example date for the instructions and makes
    /// exactly one request; failures are returned as-is.
    pub async fn rewrite_answer(
        &self,
        question: &str,
        benchmark_answer: &str,
        style: &StyleSample,
    ) -> Result<String> {
        let example_date = random_date_2025()?;
        let system = prompt::build_system_context(&self.prompt, example_date);
        let user = prompt::build_rewrite_prompt(style.as_str(), question, benchmark_answer);

        debug!(
            question,
            example_date = %example_date,
            prompt_chars = system.len() + user.len(),
            "Built rewrite directive"
        );

        let rewritten = self
            .generator
            .generate(&system, &user)
            .await
            .with_context(|| format!("Failed to rewrite answer for {:?}", question))?;

        info!(question, chars = rewritten.len(), "Answer rewritten");
        Ok(rewritten)
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }
}
