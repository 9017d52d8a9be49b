use anyhow::{Context, Result};
use docx_rs::{Docx, Paragraph, Run, Style, StyleType, Table, TableCell, TableRow};
use extract::RewrittenPair;
use std::io::Cursor;
use std::path::Path;
use tracing::info;

pub const HEADER: [&str; 2] = ["Question", "Rewritten Answer"];

const HEADING_STYLE: &str = "Heading1";

// twips; two equal columns across the default text width
const COLUMN_WIDTHS: [usize; 2] = [4500, 4500];

/// The rewritten Q&A table, built row by row and written once.
#[derive(Debug, Clone)]
pub struct OutputDocument {
    title: String,
    rows: Vec<RewrittenPair>,
}

impl OutputDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, pair: RewrittenPair) {
        self.rows.push(pair);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_docx(&self) -> Docx {
        let heading_style = Style::new(HEADING_STYLE, StyleType::Paragraph)
            .name("Heading 1")
            .size(32)
            .bold();

        let title = Paragraph::new()
            .add_run(Run::new().add_text(self.title.as_str()))
            .style(HEADING_STYLE);

        let mut rows = vec![TableRow::new(vec![
            header_cell(HEADER[0]),
            header_cell(HEADER[1]),
        ])];
        rows.extend(self.rows.iter().map(|pair| {
            TableRow::new(vec![
                text_cell(&pair.question),
                text_cell(&pair.rewritten_answer),
            ])
        }));

        Docx::new()
            .add_style(heading_style)
            .add_paragraph(title)
            .add_table(Table::new(rows).set_grid(COLUMN_WIDTHS.to_vec()))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.to_docx()
            .build()
            .pack(&mut buffer)
            .context("Failed to pack output document")?;
        Ok(buffer.into_inner())
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        tokio::fs::write(path, bytes)
            .await
            .context(format!("Failed to write output file: {:?}", path))?;

        info!(path = %path.display(), rows = self.rows.len(), "Output document written");
        Ok(())
    }
}

fn header_cell(text: &str) -> TableCell {
    TableCell::new().add_paragraph(Paragraph::new().add_run(Run::new().add_text(text).bold()))
}

/// One paragraph per line so the cell reads back with its line breaks.
fn text_cell(text: &str) -> TableCell {
    text.split('\n')
        .map(|line| Paragraph::new().add_run(Run::new().add_text(line.trim_end_matches('\r'))))
        .fold(TableCell::new(), |cell, paragraph| cell.add_paragraph(paragraph))
}
