// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract OCR engine via `leptess`.
//
// Only available with the `tesseract` feature. Needs libtesseract and the
// traineddata for every requested language (e.g. `eng`, `eng+spa`).

use std::io::Cursor;

use image::{DynamicImage, ImageFormat};
use leptess::{LepTess, Variable};
use tracing::{debug, instrument};
use wortwerk_core::config::DEFAULT_OCR_LANGUAGE;
use wortwerk_core::error::{Result, WortwerkError};

use super::recognizer::TextRecognizer;

/// Fully automatic page segmentation, no orientation detection.
pub const PAGE_SEGMENTATION_MODE: u32 = 3;

/// Tesseract-backed [`TextRecognizer`].
///
/// A fresh `LepTess` handle is created per page; the handle is not `Sync` and
/// the language may differ between conversions.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer;

impl TesseractRecognizer {
    /// Check that Tesseract initialises with the default language.
    pub fn new() -> Result<Self> {
        LepTess::new(None, DEFAULT_OCR_LANGUAGE).map_err(|err| {
            WortwerkError::Ocr(format!(
                "failed to initialise Tesseract with language '{}': {}",
                DEFAULT_OCR_LANGUAGE, err
            ))
        })?;
        Ok(Self)
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String> {
        let mut tess = LepTess::new(None, language).map_err(|err| {
            WortwerkError::Ocr(format!(
                "failed to initialise Tesseract with language '{}': {}. \
                 Make sure the language data is installed",
                language, err
            ))
        })?;

        tess.set_variable(
            Variable::TesseditPagesegMode,
            &PAGE_SEGMENTATION_MODE.to_string(),
        )
        .map_err(|err| WortwerkError::Ocr(format!("failed to set page segmentation: {}", err)))?;

        // leptess decodes encoded image data itself.
        let mut png = Cursor::new(Vec::new());
        image
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|err| WortwerkError::Ocr(format!("failed to encode page image: {}", err)))?;

        tess.set_image_from_mem(png.get_ref())
            .map_err(|err| WortwerkError::Ocr(format!("failed to load page image: {}", err)))?;

        let text = tess
            .get_utf8_text()
            .map_err(|err| WortwerkError::Ocr(format!("Tesseract returned invalid UTF-8: {}", err)))?;

        debug!(char_count = text.chars().count(), "Tesseract recognition complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_automatic_page_segmentation() {
        assert_eq!(PAGE_SEGMENTATION_MODE, 3);
    }

    #[test]
    #[ignore = "needs libtesseract with eng traineddata"]
    fn blank_page_yields_no_text() {
        let engine = TesseractRecognizer::new().expect("tesseract");
        let blank = DynamicImage::new_rgb8(200, 200);
        let text = engine.recognize(&blank, "eng").expect("recognize");
        assert!(text.trim().is_empty());
    }
}
