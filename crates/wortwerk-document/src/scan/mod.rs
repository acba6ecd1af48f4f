// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Optical character recognition for pages without usable embedded text.

pub mod recognizer;

#[cfg(feature = "ocr")]
pub mod ocr;

#[cfg(feature = "tesseract")]
pub mod tesseract;

pub use recognizer::{TextRecognizer, UnavailableRecognizer, build_recognizer};

#[cfg(feature = "ocr")]
pub use ocr::OcrsRecognizer;

#[cfg(feature = "tesseract")]
pub use tesseract::TesseractRecognizer;
