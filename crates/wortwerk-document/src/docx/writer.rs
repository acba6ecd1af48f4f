// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Serialise a `WordDocument` to .docx using `docx-rs`.

use std::fs::{self, File};
use std::path::Path;

use docx_rs::{BreakType, Docx, Paragraph, Run};
use tracing::{debug, instrument};
use wortwerk_core::error::{Result, WortwerkError};

use super::model::{Block, WordDocument, is_xml_char};

pub struct DocxWriter;

impl DocxWriter {
    /// Build the docx-rs body for `document`.
    pub fn build(document: &WordDocument) -> Docx {
        document
            .blocks()
            .iter()
            .fold(Docx::new(), |docx, block| match block {
                Block::Paragraph(text) if text.is_empty() => docx.add_paragraph(Paragraph::new()),
                Block::Paragraph(text) => {
                    docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(text)))
                }
                Block::PageBreak => docx
                    .add_paragraph(Paragraph::new().add_run(Run::new().add_break(BreakType::Page))),
            })
    }

    /// Write `document` to `path`, creating the parent directory and
    /// overwriting any existing file.
    #[instrument(skip(document), fields(path = %path.display(), blocks = document.blocks().len()))]
    pub fn save(document: &WordDocument, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut xml = Self::build(document).build();
        if let Some(title) = document.title() {
            xml.doc_props.core = core_properties_xml(title).into_bytes();
        }

        let file = File::create(path)?;
        xml.pack(file)
            .map_err(|err| WortwerkError::Docx(format!("failed to write {}: {}", path.display(), err)))?;

        debug!("docx written");
        Ok(())
    }
}

/// `docProps/core.xml` carrying `title`.
pub fn core_properties_xml(title: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            "<dc:title>{}</dc:title>",
            "<cp:revision>1</cp:revision>",
            "</cp:coreProperties>"
        ),
        escape_xml(title)
    )
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c if !is_xml_char(c) => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn title_is_escaped() {
        let xml = core_properties_xml("Q&A <draft>");
        assert!(xml.contains("<dc:title>Q&amp;A &lt;draft&gt;</dc:title>"));
    }

    fn zip_entry(path: &Path, name: &str) -> String {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        text
    }

    #[test]
    fn save_writes_zip_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("report.docx");

        let mut doc = WordDocument::with_title("Q&A minutes");
        doc.add_page_text("Hello\n\nWorld");
        doc.add_page_break();
        doc.add_page_text("");

        DocxWriter::save(&doc, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"), "docx must be a zip container");

        let core = zip_entry(&path, "docProps/core.xml");
        assert!(core.contains("<dc:title>Q&amp;A minutes</dc:title>"), "core.xml: {core}");

        let body = zip_entry(&path, "word/document.xml");
        assert!(body.contains("Hello"));
        assert!(body.contains("World"));
        assert!(body.contains("[Blank page]"));
    }

    #[test]
    fn control_characters_never_reach_the_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("controls.docx");

        let mut doc = WordDocument::with_title("controls\u{1}");
        doc.add_page_text("bullet\u{1}item\u{7} and\u{0}null");
        DocxWriter::save(&doc, &path).unwrap();

        let body = zip_entry(&path, "word/document.xml");
        assert!(body.contains("bulletitem andnull"), "document.xml: {body}");
        assert!(!body.contains(['\u{0}', '\u{1}', '\u{7}']));

        let core = zip_entry(&path, "docProps/core.xml");
        assert!(core.contains("<dc:title>controls</dc:title>"));
    }

    #[test]
    fn escaping_drops_forbidden_characters() {
        assert_eq!(escape_xml("a\u{0}b\u{ffff}<c"), "ab&lt;c");
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        std::fs::write(&path, b"stale").unwrap();

        DocxWriter::save(&WordDocument::with_title("report"), &path).unwrap();

        assert!(std::fs::read(&path).unwrap().starts_with(b"PK"));
    }
}
