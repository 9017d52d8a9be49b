use serde::{Deserialize, Serialize};

/// Body of a Word document: its direct block children in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
    /// Number of grid columns this cell spans (`w:gridSpan`)
    pub grid_span: usize,
    pub vertical_merge: VerticalMerge,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerticalMerge {
    #[default]
    None,
    Restart,
    Continue,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Body-level paragraphs; paragraphs inside table cells are not included.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            paragraphs: Vec::new(),
            grid_span: 1,
            vertical_merge: VerticalMerge::None,
        }
    }
}

impl Cell {
    /// Cell holding one paragraph per line of `text`.
    pub fn from_text(text: &str) -> Self {
        Self {
            paragraphs: text.split('\n').map(Paragraph::new).collect(),
            ..Self::default()
        }
    }

    /// Paragraph texts joined with newlines
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    /// Lay every row out on the table grid.
    ///
    /// A cell spanning `n` grid columns appears `n` times. A vertical-merge
    /// continuation cell resolves to the cell occupying the same grid column
    /// in the row above, so merged regions read as the text that starts them.
    pub fn resolved_rows(&self) -> Vec<Vec<&Cell>> {
        let mut resolved: Vec<Vec<&Cell>> = Vec::with_capacity(self.rows.len());

        for row in &self.rows {
            let mut cells: Vec<&Cell> = Vec::with_capacity(row.cells.len());

            for cell in &row.cells {
                let column = cells.len();
                let source = match cell.vertical_merge {
                    VerticalMerge::Continue => resolved
                        .last()
                        .and_then(|above| above.get(column).copied())
                        .unwrap_or(cell),
                    VerticalMerge::None | VerticalMerge::Restart => cell,
                };

                for _ in 0..cell.grid_span.max(1) {
                    cells.push(source);
                }
            }

            resolved.push(cells);
        }

        resolved
    }
}
