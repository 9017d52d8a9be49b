//! WordprocessingML parsing for the main document part and the package
//! relationships that point at it.

use anyhow::{Context, Result, bail};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::document::{Block, Cell, Document, Paragraph, Row, Table, VerticalMerge};

/// Parse `word/document.xml` into its body blocks.
pub fn parse_document_xml(xml: &str) -> Result<Document> {
    BodyParser::new(xml.trim_start_matches('\u{feff}')).parse()
}

/// Find the main document part named in `_rels/.rels`.
pub fn office_document_target(rels_xml: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(rels_xml.trim_start_matches('\u{feff}'));

    loop {
        match reader
            .read_event()
            .context("Malformed package relationships")?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let is_main = attribute(&e, b"Type")
                    .is_some_and(|kind| kind.ends_with("/officeDocument"));
                if is_main {
                    return Ok(attribute(&e, b"Target")
                        .map(|target| target.trim_start_matches('/').to_string()));
                }
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

struct BodyParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> BodyParser<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    fn next(&mut self) -> Result<Event<'a>> {
        let position = self.reader.buffer_position();
        self.reader
            .read_event()
            .with_context(|| format!("Malformed document XML near byte {}", position))
    }

    fn skip(&mut self, start: &BytesStart<'a>) -> Result<()> {
        self.reader
            .read_to_end(start.name())
            .context("Malformed document XML")?;
        Ok(())
    }

    fn parse(mut self) -> Result<Document> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"w:body" => break,
                Event::Empty(e) if e.name().as_ref() == b"w:body" => {
                    return Ok(Document::default());
                }
                Event::Eof => bail!("Document part has no w:body element"),
                _ => {}
            }
        }

        let mut blocks = Vec::new();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:p" => blocks.push(Block::Paragraph(self.paragraph()?)),
                    b"w:tbl" => blocks.push(Block::Table(self.table()?)),
                    // sectPr, sdt, bookmarks: not blocks
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"w:p" => {
                    blocks.push(Block::Paragraph(Paragraph::default()));
                }
                Event::End(e) if e.name().as_ref() == b"w:body" => break,
                Event::Eof => bail!("Unexpected end of document inside w:body"),
                _ => {}
            }
        }

        Ok(Document::new(blocks))
    }

    /// Consume a `w:p` whose start tag has already been read.
    ///
    /// Every `w:t` beneath the paragraph counts, including text-box content.
    fn paragraph(&mut self) -> Result<Paragraph> {
        let mut text = String::new();
        let mut depth = 1usize;
        let mut runs = 0usize;
        // open pPr/rPr elements; tab stops and the like live there
        let mut properties = 0usize;
        let mut in_text = false;

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:p" => depth += 1,
                    b"w:r" => runs += 1,
                    b"w:t" => in_text = true,
                    b"w:pPr" | b"w:rPr" => properties += 1,
                    _ => {}
                },
                Event::Empty(e) if runs > 0 && properties == 0 => {
                    push_run_control(&mut text, &e);
                }
                Event::Text(e) if in_text => {
                    text.push_str(&e.unescape().context("Invalid text in w:t")?);
                }
                Event::CData(e) if in_text => {
                    text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text = false,
                    b"w:r" => runs = runs.saturating_sub(1),
                    b"w:pPr" | b"w:rPr" => properties = properties.saturating_sub(1),
                    b"w:p" => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                },
                Event::Eof => bail!("Unexpected end of document inside w:p"),
                _ => {}
            }
        }

        Ok(Paragraph { text })
    }

    fn table(&mut self) -> Result<Table> {
        let mut rows = Vec::new();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:tr" => rows.push(self.row()?),
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"w:tr" => rows.push(Row::default()),
                Event::End(e) if e.name().as_ref() == b"w:tbl" => break,
                Event::Eof => bail!("Unexpected end of document inside w:tbl"),
                _ => {}
            }
        }

        Ok(Table { rows })
    }

    fn row(&mut self) -> Result<Row> {
        let mut cells = Vec::new();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:tc" => cells.push(self.cell()?),
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"w:tc" => cells.push(Cell::default()),
                Event::End(e) if e.name().as_ref() == b"w:tr" => break,
                Event::Eof => bail!("Unexpected end of document inside w:tr"),
                _ => {}
            }
        }

        Ok(Row { cells })
    }

    /// Only the cell's direct paragraphs make up its text; nested tables are skipped.
    fn cell(&mut self) -> Result<Cell> {
        let mut cell = Cell::default();

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:tcPr" => self.cell_properties(&mut cell)?,
                    b"w:p" => cell.paragraphs.push(self.paragraph()?),
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"w:p" => {
                    cell.paragraphs.push(Paragraph::default());
                }
                Event::End(e) if e.name().as_ref() == b"w:tc" => break,
                Event::Eof => bail!("Unexpected end of document inside w:tc"),
                _ => {}
            }
        }

        Ok(cell)
    }

    fn cell_properties(&mut self, cell: &mut Cell) -> Result<()> {
        loop {
            match self.next()? {
                Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                    b"w:gridSpan" => {
                        cell.grid_span = attribute(&e, b"w:val")
                            .and_then(|value| value.trim().parse::<usize>().ok())
                            .unwrap_or(1)
                            .max(1);
                    }
                    b"w:vMerge" => {
                        cell.vertical_merge = match attribute(&e, b"w:val").as_deref() {
                            Some("restart") => VerticalMerge::Restart,
                            _ => VerticalMerge::Continue,
                        };
                    }
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"w:tcPr" => return Ok(()),
                Event::Eof => bail!("Unexpected end of document inside w:tcPr"),
                _ => {}
            }
        }
    }
}

fn push_run_control(text: &mut String, element: &BytesStart) {
    match element.name().as_ref() {
        b"w:tab" | b"w:ptab" => text.push('\t'),
        b"w:cr" => text.push('\n'),
        b"w:br" => {
            // page and column breaks carry no text
            let kind = attribute(element, b"w:type");
            if kind.as_deref().unwrap_or("textWrapping") == "textWrapping" {
                text.push('\n');
            }
        }
        b"w:noBreakHyphen" => text.push('-'),
        _ => {}
    }
}

fn attribute(element: &BytesStart, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}
