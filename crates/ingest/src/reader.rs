use anyhow::{Context, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;
use tracing::debug;

use crate::document::Document;
use crate::parser::{office_document_target, parse_document_xml};

const DEFAULT_MAIN_PART: &str = "word/document.xml";
const PACKAGE_RELS: &str = "_rels/.rels";

pub struct DocxReader;

impl DocxReader {
    pub async fn read_file(path: &Path) -> Result<Document> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");

        match extension.to_ascii_lowercase().as_str() {
            "docx" | "docm" => {
                let bytes = fs::read(path)
                    .await
                    .context(format!("Failed to read file: {:?}", path))?;
                let document = Self::read_bytes(&bytes)
                    .context(format!("Failed to parse document: {:?}", path))?;
                debug!(path = %path.display(), blocks = document.blocks.len(), "Document read");
                Ok(document)
            }
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    pub fn read_bytes(bytes: &[u8]) -> Result<Document> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .context("Not a valid .docx package")?;

        let main_part = match read_part(&mut archive, PACKAGE_RELS)? {
            Some(rels) => office_document_target(&rels)?
                .unwrap_or_else(|| DEFAULT_MAIN_PART.to_string()),
            None => DEFAULT_MAIN_PART.to_string(),
        };

        let xml = read_part(&mut archive, &main_part)?
            .with_context(|| format!("Package has no main document part {}", main_part))?;

        parse_document_xml(&xml).context(format!("Failed to parse {}", main_part))
    }
}

fn read_part(
    archive: &mut zip::ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e).context(format!("Failed to open part {}", name)),
    };

    let mut content = String::new();
    file.read_to_string(&mut content)
        .context(format!("Failed to read part {}", name))?;
    Ok(Some(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Block;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Heading</w:t></w:r></w:p>
<w:tbl><w:tr><w:tc><w:p><w:r><w:t>Q</w:t></w:r></w:p></w:tc><w:tc><w:p><w:r><w:t>A</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
</w:body></w:document>"#;

    fn package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer.start_file(*name, SimpleFileOptions::default()).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_default_main_part() {
        let bytes = package(&[("word/document.xml", DOCUMENT_XML)]);
        let doc = DocxReader::read_bytes(&bytes).unwrap();

        assert_eq!(doc.blocks.len(), 2);
        assert!(matches!(&doc.blocks[1], Block::Table(t) if t.rows[0].cells.len() == 2));
    }

    #[test]
    fn test_read_main_part_from_relationships() {
        let rels = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/main.xml"/></Relationships>"#;
        let bytes = package(&[("_rels/.rels", rels), ("word/main.xml", DOCUMENT_XML)]);

        let doc = DocxReader::read_bytes(&bytes).unwrap();
        assert_eq!(doc.paragraphs().next().unwrap().text(), "Heading");
    }

    #[test]
    fn test_missing_main_part_is_error() {
        let bytes = package(&[("word/other.xml", DOCUMENT_XML)]);
        let err = DocxReader::read_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }

    #[test]
    fn test_not_a_zip_is_error() {
        assert!(DocxReader::read_bytes(b"plain text").is_err());
    }

    #[tokio::test]
    async fn test_read_file_checks_extension() {
        let dir = tempfile::tempdir().unwrap();

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "hello").unwrap();
        let err = DocxReader::read_file(&txt).await.unwrap_err();
        assert!(err.to_string().contains("Unsupported file format"));

        let docx = dir.path().join("sample.docx");
        std::fs::write(&docx, package(&[("word/document.xml", DOCUMENT_XML)])).unwrap();
        let doc = DocxReader::read_file(&docx).await.unwrap();
        assert_eq!(doc.tables().count(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_file_is_error() {
        let err = DocxReader::read_file(Path::new("does/not/exist.docx"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
