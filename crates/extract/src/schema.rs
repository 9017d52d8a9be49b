use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QAPair {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenPair {
    pub question: String,
    pub rewritten_answer: String,
}

impl QAPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Case-insensitive substring test on the question text
    pub fn question_contains(&self, keyword: &str) -> bool {
        self.question
            .to_lowercase()
            .contains(&keyword.to_lowercase())
    }
}

impl RewrittenPair {
    pub fn new(question: impl Into<String>, rewritten_answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            rewritten_answer: rewritten_answer.into(),
        }
    }
}
