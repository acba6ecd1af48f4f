// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Backend-agnostic view of an opened PDF.
//
// The conversion pipeline only needs four things from a PDF library: page
// count, an encryption check with a way to try a secret, the embedded text of
// a page, and a raster of a page. Keeping those behind traits lets the
// pipeline run against lopdf in production and against in-memory fakes in
// tests.

use std::path::Path;

use image::DynamicImage;
use wortwerk_core::error::Result;

/// An opened, exclusively owned PDF handle. Dropping it releases the file.
pub trait SourceDocument {
    /// Number of pages.
    fn page_count(&self) -> usize;

    /// True while the document is encrypted and still locked.
    fn needs_password(&self) -> bool;

    /// Try one secret. `Ok(false)` means the secret was wrong; `Err` means the
    /// attempt itself broke.
    fn authenticate(&mut self, secret: &str) -> Result<bool>;

    /// Embedded text of the 0-based page `index`, untrimmed.
    fn page_text(&self, index: usize) -> Result<String>;

    /// Rasterise the 0-based page `index` at `dpi`.
    fn render_page(&self, index: usize, dpi: u32) -> Result<DynamicImage>;
}

/// Opens paths into [`SourceDocument`]s.
pub trait PdfBackend {
    type Document: SourceDocument;

    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// One page of a [`SourceDocument`]; cannot outlive it.
#[derive(Clone, Copy)]
pub struct Page<'a> {
    document: &'a dyn SourceDocument,
    index: usize,
}

impl<'a> Page<'a> {
    pub fn new(document: &'a dyn SourceDocument, index: usize) -> Self {
        Self { document, index }
    }

    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based page number, as shown to users.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn text(&self) -> Result<String> {
        self.document.page_text(self.index)
    }

    pub fn render(&self, dpi: u32) -> Result<DynamicImage> {
        self.document.render_page(self.index, dpi)
    }
}

impl std::fmt::Debug for Page<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").field("index", &self.index).finish()
    }
}
