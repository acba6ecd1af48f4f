// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR engine seam. Engines are built once at startup and shared by every
// page of every conversion.

use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;
use tracing::{info, warn};
use wortwerk_core::config::OcrEngineKind;
use wortwerk_core::error::{Result, WortwerkError};

/// Turns a page image into text.
pub trait TextRecognizer: Send + Sync {
    /// Short engine name for log lines.
    fn name(&self) -> &'static str;

    /// Recognise all text in `image`. `language` is a Tesseract-style code
    /// such as `eng` or `eng+spa`.
    fn recognize(&self, image: &DynamicImage, language: &str) -> Result<String>;
}

/// Engine stand-in used when OCR is disabled or could not be initialised.
/// Every call fails, so sparse pages keep their direct text.
#[derive(Debug, Clone)]
pub struct UnavailableRecognizer {
    reason: String,
}

impl UnavailableRecognizer {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl TextRecognizer for UnavailableRecognizer {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn recognize(&self, _image: &DynamicImage, _language: &str) -> Result<String> {
        Err(WortwerkError::Ocr(self.reason.clone()))
    }
}

/// Build the engine selected in the configuration.
///
/// Never fails: an engine that is not compiled in, or whose initialisation
/// fails, is replaced by an [`UnavailableRecognizer`] carrying the reason.
pub fn build_recognizer(
    kind: OcrEngineKind,
    model_dir: Option<PathBuf>,
) -> Arc<dyn TextRecognizer> {
    let result: Result<Arc<dyn TextRecognizer>> = match kind {
        OcrEngineKind::Disabled => Err(WortwerkError::Ocr("OCR is disabled in settings".into())),
        OcrEngineKind::Tesseract => tesseract_engine(),
        OcrEngineKind::Ocrs => ocrs_engine(model_dir),
        OcrEngineKind::Auto => tesseract_engine().or_else(|err| {
            info!(%err, "Tesseract unavailable, trying ocrs");
            ocrs_engine(model_dir)
        }),
    };

    match result {
        Ok(engine) => {
            info!(engine = engine.name(), "OCR engine ready");
            engine
        }
        Err(err) => {
            warn!(%err, "OCR unavailable; sparse pages will keep their embedded text");
            Arc::new(UnavailableRecognizer::new(err.to_string()))
        }
    }
}

#[cfg(feature = "tesseract")]
fn tesseract_engine() -> Result<Arc<dyn TextRecognizer>> {
    Ok(Arc::new(super::tesseract::TesseractRecognizer::new()?))
}

#[cfg(not(feature = "tesseract"))]
fn tesseract_engine() -> Result<Arc<dyn TextRecognizer>> {
    Err(WortwerkError::Ocr(
        "built without the `tesseract` feature".into(),
    ))
}

#[cfg(feature = "ocr")]
fn ocrs_engine(model_dir: Option<PathBuf>) -> Result<Arc<dyn TextRecognizer>> {
    let config = match model_dir {
        Some(dir) => super::ocr::OcrConfig::from_dir(dir),
        None => super::ocr::OcrConfig::default(),
    };
    Ok(Arc::new(super::ocr::OcrsRecognizer::new(config)?))
}

#[cfg(not(feature = "ocr"))]
fn ocrs_engine(_model_dir: Option<PathBuf>) -> Result<Arc<dyn TextRecognizer>> {
    Err(WortwerkError::Ocr("built without the `ocr` feature".into()))
}
