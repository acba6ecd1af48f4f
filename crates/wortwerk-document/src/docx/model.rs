// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// In-memory Word document: an ordered list of plain paragraphs and page
// breaks, plus a title for the document properties. Characters XML 1.0
// cannot carry are dropped on the way in.

/// Paragraph written for a page that resolved to no text.
pub const BLANK_PAGE_MARKER: &str = "[Blank page]";

/// One body element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(String),
    PageBreak,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordDocument {
    title: Option<String>,
    blocks: Vec<Block>,
}

impl WordDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        let mut document = Self::new();
        document.set_title(title);
        document
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(xml_text(title.into()));
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.blocks.push(Block::Paragraph(xml_text(text.into())));
    }

    pub fn add_page_break(&mut self) {
        self.blocks.push(Block::PageBreak);
    }

    /// Append one page's resolved text: one paragraph per line, or the
    /// blank-page marker when `text` is empty.
    pub fn add_page_text(&mut self, text: &str) {
        if text.is_empty() {
            self.add_paragraph(BLANK_PAGE_MARKER);
            return;
        }
        for line in split_lines(text) {
            self.add_paragraph(line);
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Paragraph(text) => Some(text.as_str()),
            Block::PageBreak => None,
        })
    }

    pub fn page_break_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|block| matches!(block, Block::PageBreak))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Whether XML 1.0 allows `c` in character data.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{d7ff}' | '\u{e000}'..='\u{fffd}' | '\u{10000}'..='\u{10ffff}'
    )
}

/// `text` without the characters XML 1.0 forbids (NUL, most C0 controls,
/// U+FFFE and U+FFFF).
fn xml_text(text: String) -> String {
    if text.chars().all(is_xml_char) {
        text
    } else {
        text.chars().filter(|&c| is_xml_char(c)).collect()
    }
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on universal line boundaries.
///
/// `\r\n` counts as one boundary, interior empty lines are kept and a
/// trailing boundary does not produce a final empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..at]);
        let mut end = at + c.len_utf8();
        if c == '\r'
            && let Some(&(next_at, '\n')) = chars.peek()
        {
            chars.next();
            end = next_at + 1;
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
