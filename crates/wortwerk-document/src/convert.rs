// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF to Word conversion.
//
// Pipeline: resolve the input path, open (and unlock) the PDF, resolve each
// page's text in order, then write `<output_dir>/<stem>.docx` in one go. The
// source handle is scoped to `assemble_with` and is dropped on every exit
// path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, instrument};
use wortwerk_core::config::AppConfig;
use wortwerk_core::error::{Result, WortwerkError};
use wortwerk_core::{ConvertOptions, ProgressObserver};

use crate::docx::{DocxWriter, WordDocument};
use crate::pdf::{LopdfBackend, Page, PdfBackend, SourceDocument};
use crate::progress::Progress;
use crate::resolve::PageTextResolver;
use crate::scan::TextRecognizer;
use crate::unlock::open_document;

/// Converts PDFs into `.docx` files inside one output directory.
#[derive(Debug, Clone)]
pub struct Converter<B: PdfBackend = LopdfBackend> {
    backend: B,
    resolver: PageTextResolver,
    output_dir: PathBuf,
}

impl Converter<LopdfBackend> {
    /// Production converter: lopdf backend, settings from `config`.
    pub fn from_config(config: &AppConfig, recognizer: Arc<dyn TextRecognizer>) -> Self {
        let resolver = PageTextResolver::new(recognizer)
            .with_dpi(config.ocr_dpi)
            .with_default_language(config.ocr_language.clone());
        Self::new(LopdfBackend, resolver, config.output_dir.clone())
    }
}

impl<B: PdfBackend> Converter<B> {
    pub fn new(backend: B, resolver: PageTextResolver, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            resolver,
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn resolver(&self) -> &PageTextResolver {
        &self.resolver
    }

    /// Where the converted `input` will be written.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        self.output_dir.join(format!("{}.docx", document_stem(input)))
    }

    /// Convert `pdf_path` and return the path of the written `.docx`.
    ///
    /// Nothing is written unless every page was processed.
    #[instrument(skip(self, options, observer), fields(path = %pdf_path.display()))]
    pub fn convert(
        &self,
        pdf_path: &Path,
        options: &ConvertOptions,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<PathBuf> {
        let progress = Progress::new(observer);
        let input = resolve_input_path(pdf_path)?;

        let document = self.assemble_with(&input, options, &progress)?;

        let output = self.output_path_for(&input);
        DocxWriter::save(&document, &output)?;
        progress.emit(&format!("Saved Word document: {}", file_name(&output)));

        info!(output = %output.display(), "conversion complete");
        Ok(output)
    }

    /// Build the Word document for `pdf_path` without saving it.
    pub fn assemble(
        &self,
        pdf_path: &Path,
        options: &ConvertOptions,
        observer: Option<&dyn ProgressObserver>,
    ) -> Result<WordDocument> {
        let input = resolve_input_path(pdf_path)?;
        self.assemble_with(&input, options, &Progress::new(observer))
    }

    fn assemble_with(
        &self,
        input: &Path,
        options: &ConvertOptions,
        progress: &Progress<'_>,
    ) -> Result<WordDocument> {
        progress.emit(&format!("Opening PDF: {}", file_name(input)));
        let source = open_document(&self.backend, input, &options.credentials)?;

        progress.emit("Beginning text extraction...");
        let mut output = WordDocument::with_title(document_stem(input));
        let page_count = source.page_count();
        let language = options.ocr_language.as_deref();

        for index in 0..page_count {
            progress.emit(&format!("Processing page {}/{}", index + 1, page_count));

            let page = Page::new(&source, index);
            let text = self
                .resolver
                .resolve(&page, options.min_text_threshold, language, progress);
            output.add_page_text(&text);

            if index + 1 < page_count {
                output.add_page_break();
            }
        }

        Ok(output)
    }
}

/// Expand a leading `~` and canonicalise. Fails with `NotFound` when the
/// file does not exist.
pub fn resolve_input_path(raw: &Path) -> Result<PathBuf> {
    let expanded = expand_home(raw);
    if !expanded.exists() {
        return Err(WortwerkError::NotFound(expanded));
    }
    Ok(expanded.canonicalize()?)
}

fn expand_home(raw: &Path) -> PathBuf {
    match raw.to_str() {
        Some(text) => PathBuf::from(shellexpand::tilde(text).into_owned()),
        None => raw.to_path_buf(),
    }
}

fn document_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "document".to_string())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::UnavailableRecognizer;

    fn converter(output_dir: &Path) -> Converter {
        let resolver = PageTextResolver::new(Arc::new(UnavailableRecognizer::new("off")));
        Converter::new(LopdfBackend, resolver, output_dir)
    }

    #[test]
    fn output_path_uses_input_stem() {
        let conv = converter(Path::new("/srv/word_docs"));
        assert_eq!(
            conv.output_path_for(Path::new("/home/a/Quarterly Report.pdf")),
            PathBuf::from("/srv/word_docs/Quarterly Report.docx")
        );
    }

    #[test]
    fn output_path_keeps_inner_dots() {
        let conv = converter(Path::new("out"));
        assert_eq!(
            conv.output_path_for(Path::new("v1.2.notes.PDF")),
            PathBuf::from("out/v1.2.notes.docx")
        );
    }

    #[test]
    fn missing_input_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.pdf");
        match resolve_input_path(&missing) {
            Err(WortwerkError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn existing_input_is_canonicalised() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("in.pdf");
        std::fs::write(&file, b"%PDF-1.5").unwrap();
        let resolved = resolve_input_path(&dir.path().join(".").join("in.pdf")).unwrap();
        assert_eq!(resolved, file.canonicalize().unwrap());
    }

    #[test]
    fn tilde_expands_to_home() {
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(expand_home(Path::new("~/docs/a.pdf")), PathBuf::from(home).join("docs/a.pdf"));
        }
        assert_eq!(expand_home(Path::new("/abs/a.pdf")), PathBuf::from("/abs/a.pdf"));
    }
}
