// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-page text resolution: embedded text when there is enough of it, OCR
// otherwise. Never fails; an OCR failure falls back to whatever embedded
// text the page had.

use std::sync::Arc;

use tracing::{debug, error, warn};
use wortwerk_core::config::{DEFAULT_OCR_DPI, DEFAULT_OCR_LANGUAGE};

use crate::pdf::Page;
use crate::progress::Progress;
use crate::scan::TextRecognizer;

/// Result of one OCR attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OcrOutcome {
    Recognized(String),
    Failed(String),
}

/// Decides, page by page, where the text comes from.
#[derive(Clone)]
pub struct PageTextResolver {
    recognizer: Arc<dyn TextRecognizer>,
    dpi: u32,
    default_language: String,
}

impl PageTextResolver {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            recognizer,
            dpi: DEFAULT_OCR_DPI,
            default_language: DEFAULT_OCR_LANGUAGE.to_string(),
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    pub fn recognizer_name(&self) -> &'static str {
        self.recognizer.name()
    }

    /// Best available text for `page`, trimmed.
    ///
    /// Pages whose trimmed embedded text has fewer than `threshold`
    /// characters are rendered and OCR'd exactly once. A threshold of 0
    /// never triggers OCR.
    pub fn resolve(
        &self,
        page: &Page<'_>,
        threshold: usize,
        language: Option<&str>,
        progress: &Progress<'_>,
    ) -> String {
        let direct = match page.text() {
            Ok(text) => text.trim().to_string(),
            Err(err) => {
                warn!(page = page.number(), %err, "Direct text extraction failed; treating page as empty");
                String::new()
            }
        };

        let char_count = direct.chars().count();
        if char_count >= threshold {
            debug!(page = page.number(), char_count, "Page text taken from embedded layer");
            return direct;
        }

        progress.emit(&format!(
            "Page {}: insufficient text ({} chars); running OCR.",
            page.number(),
            char_count
        ));

        match self.ocr(page, language) {
            OcrOutcome::Recognized(text) => {
                debug!(
                    page = page.number(),
                    engine = self.recognizer.name(),
                    char_count = text.chars().count(),
                    "Page text taken from OCR"
                );
                text
            }
            OcrOutcome::Failed(reason) => {
                error!(page = page.number(), %reason, "OCR failed on page");
                direct
            }
        }
    }

    fn ocr(&self, page: &Page<'_>, language: Option<&str>) -> OcrOutcome {
        let language = language
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .unwrap_or(&self.default_language);

        let image = match page.render(self.dpi) {
            Ok(image) => image,
            Err(err) => return OcrOutcome::Failed(err.to_string()),
        };

        match self.recognizer.recognize(&image, language) {
            Ok(text) => OcrOutcome::Recognized(text.trim().to_string()),
            Err(err) => OcrOutcome::Failed(err.to_string()),
        }
    }
}

impl std::fmt::Debug for PageTextResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageTextResolver")
            .field("recognizer", &self.recognizer.name())
            .field("dpi", &self.dpi)
            .field("default_language", &self.default_language)
            .finish()
    }
}
