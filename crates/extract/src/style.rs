use anyhow::Result;
use ingest::Document;
use std::path::Path;

/// Reference text whose voice the rewritten answers should borrow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSample(String);

impl StyleSample {
    /// Join every non-empty body paragraph, trimmed, with single spaces.
    /// Text boxes anchored in a paragraph count as part of it.
    pub fn from_document(document: &Document) -> Self {
        let text = document
            .paragraphs()
            .map(|p| p.text().trim())
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for StyleSample {
    fn from(text: String) -> Self {
        Self(text)
    }
}

/// Read the transcript document and build its style sample
pub async fn read_transcript_style(path: &Path) -> Result<StyleSample> {
    let document = ingest::ingest_file(path).await?;
    Ok(StyleSample::from_document(&document))
}
