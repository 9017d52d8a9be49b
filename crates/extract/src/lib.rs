pub mod normalizer;
pub mod schema;
pub mod style;

pub use normalizer::{HeadingMatcher, normalize};
pub use schema::{QAPair, RewrittenPair};
pub use style::{StyleSample, read_transcript_style};

use anyhow::Result;
use ingest::{Block, Document, Table};
use std::path::Path;
use tracing::debug;

/// Collect question/answer pairs from the first table after `heading`.
///
/// A paragraph whose normalized text contains the normalized heading opens
/// the window; the next table block is the only one read. Rows need at least
/// two cells with non-empty trimmed text in the first two.
pub fn extract_qa_from_table(document: &Document, heading: &str) -> Vec<QAPair> {
    let matcher = HeadingMatcher::new(heading);
    let mut found_heading = false;

    for block in &document.blocks {
        match block {
            Block::Paragraph(paragraph) => {
                if matcher.matches(paragraph.text()) {
                    found_heading = true;
                }
            }
            Block::Table(table) if found_heading => {
                let pairs = table_pairs(table);
                debug!(heading = matcher.heading(), pairs = pairs.len(), "Heading table found");
                return pairs;
            }
            Block::Table(_) => {}
        }
    }

    debug!(heading = matcher.heading(), "No table found after heading");
    Vec::new()
}

fn table_pairs(table: &Table) -> Vec<QAPair> {
    table
        .resolved_rows()
        .into_iter()
        .filter(|cells| cells.len() >= 2)
        .filter_map(|cells| {
            let question = cells[0].text().trim().to_string();
            let answer = cells[1].text().trim().to_string();
            (!question.is_empty() && !answer.is_empty()).then(|| QAPair::new(question, answer))
        })
        .collect()
}

/// Read a benchmark document and extract the pairs under `heading`
pub async fn extract_qa_from_file(file_path: &Path, heading: &str) -> Result<Vec<QAPair>> {
    let document = ingest::ingest_file(file_path).await?;
    Ok(extract_qa_from_table(&document, heading))
}
