// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module: opening, unlocking, text extraction and page rasterisation.

#[cfg(feature = "pdfium")]
pub mod raster;
pub mod reader;
pub mod source;

pub use reader::{LopdfBackend, PdfReader};
pub use source::{Page, PdfBackend, SourceDocument};
