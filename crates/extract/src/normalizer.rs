use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Normalize text for heading comparison: lowercase, trim, collapse whitespace runs
pub fn normalize(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    WHITESPACE.replace_all(&lowered, " ").into_owned()
}

/// Matches paragraph text against a target heading after normalization.
#[derive(Debug, Clone)]
pub struct HeadingMatcher {
    heading: String,
}

impl HeadingMatcher {
    pub fn new(heading: &str) -> Self {
        Self {
            heading: normalize(heading),
        }
    }

    /// True when the normalized text contains the normalized heading.
    pub fn matches(&self, text: &str) -> bool {
        normalize(text).contains(&self.heading)
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }
}
