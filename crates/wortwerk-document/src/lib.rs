// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// wortwerk-document: PDF to Word conversion for Wortwerk.
//
// Opens (and if needed unlocks) PDFs, resolves each page's text from the
// embedded text layer or via OCR, and writes one `.docx` per input.

pub mod convert;
pub mod docx;
pub mod pdf;
pub mod progress;
pub mod resolve;
pub mod scan;
pub mod unlock;

// Re-export the primary types so callers can use `wortwerk_document::Converter` etc.
pub use convert::Converter;
pub use docx::{DocxWriter, WordDocument};
pub use pdf::{LopdfBackend, Page, PdfBackend, PdfReader, SourceDocument};
pub use progress::Progress;
pub use resolve::PageTextResolver;
pub use scan::{TextRecognizer, UnavailableRecognizer, build_recognizer};
pub use unlock::{candidate_secrets, open_document};

#[cfg(feature = "ocr")]
pub use scan::OcrsRecognizer;

#[cfg(feature = "tesseract")]
pub use scan::TesseractRecognizer;
