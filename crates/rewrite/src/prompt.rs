use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Assessment details named in the instruction block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub unit: String,
    pub course: String,
    pub section: String,
    /// File name the student's name is read from; set from the transcript path
    #[serde(skip)]
    pub transcript_name: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            unit: "BSBTWK502 Manage team effectiveness".to_string(),
            course: "CHC52021".to_string(),
            section: "Section C".to_string(),
            transcript_name: "Sample call record transcript.docx".to_string(),
        }
    }
}

pub const THREE_EXAMPLES_RULE: &str = "If the question asks for 3 examples or 3 occasions, \
the answer must include exactly 3 examples, formatted as 'Example 1: ...', 'Example 2: ...', 'Example 3: ...'.";

pub fn build_system_context(config: &PromptConfig, example_date: NaiveDate) -> String {
    format!(
        r#"You are rewriting benchmark answers for {unit}. This is a competency conversation document for {unit} on the course {course}. You are rewriting benchmark answers provided in {section}. Rules to follow strictly:
1. Give a new rewritten answer that is guided by the benchmark answer, but paraphrased based on the words and style in the student's call recording transcript.
2. The revised answer must keep the benchmark criteria while sounding like the transcript.
3. If the benchmark answer is long, the rewritten one must also be long and detailed, reflecting the transcript style.
4. Use the student's name based on the filename of the transcript (e.g., from '{transcript}').
5. {three_examples}
6. Keep terminologies with capitalised first letters (like Team Meetings, Key Performance Indicators) capitalised in the rewritten answer.
7. Insert a random date between past and current in 2025, like {date}, where suitable."#,
        unit = config.unit,
        course = config.course,
        section = config.section,
        transcript = config.transcript_name,
        three_examples = THREE_EXAMPLES_RULE,
        date = example_date.format("%Y-%m-%d"),
    )
}

pub fn build_rewrite_prompt(style: &str, question: &str, benchmark_answer: &str) -> String {
    format!(
        "Transcript Style Sample: {}\n\n\
         Question: {}\n\n\
         Benchmark Answer: {}\n\n\
         Rewrite the Benchmark Answer in the style of the Transcript.",
        style, question, benchmark_answer
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_context_rules() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let context = build_system_context(&PromptConfig::default(), date);

        assert!(context.starts_with(
            "You are rewriting benchmark answers for BSBTWK502 Manage team effectiveness."
        ));
        assert!(context.contains("on the course CHC52021"));
        assert!(context.contains("provided in Section C"));
        assert!(context.contains("from 'Sample call record transcript.docx'"));
        assert!(context.contains(THREE_EXAMPLES_RULE));
        assert!(context.contains("like 2025-03-14, where suitable"));
        for rule in 1..=7 {
            assert!(context.contains(&format!("\n{}. ", rule)), "rule {} missing", rule);
        }
    }

    #[test]
    fn test_system_context_uses_config() {
        let config = PromptConfig {
            transcript_name: "Jordan Lee transcript.docx".to_string(),
            ..PromptConfig::default()
        };
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert!(build_system_context(&config, date).contains("'Jordan Lee transcript.docx'"));
    }

    #[test]
    fn test_rewrite_prompt_layout() {
        let prompt = build_rewrite_prompt("so yeah", "Question 1: Why?", "Because.");
        assert_eq!(
            prompt,
            "Transcript Style Sample: so yeah\n\nQuestion: Question 1: Why?\n\nBenchmark Answer: Because.\n\nRewrite the Benchmark Answer in the style of the Transcript."
        );
    }
}
