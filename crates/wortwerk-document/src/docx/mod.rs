// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word output.

pub mod model;
pub mod writer;

pub use model::{BLANK_PAGE_MARKER, Block, WordDocument, split_lines};
pub use writer::DocxWriter;
