pub mod document;
pub mod parser;
pub mod reader;

pub use document::{Block, Cell, Document, Paragraph, Row, Table, VerticalMerge};
pub use reader::DocxReader;

use anyhow::Result;
use std::path::Path;

/// Read a `.docx` file into its body blocks
pub async fn ingest_file(file_path: &Path) -> Result<Document> {
    DocxReader::read_file(file_path).await
}
