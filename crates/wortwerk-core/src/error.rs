// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Wortwerk.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Wortwerk operations.
#[derive(Debug, Error)]
pub enum WortwerkError {
    // -- Input errors --
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to unlock PDF: {file}. Check username/password.")]
    Unlock { file: String },

    // -- Document errors --
    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("page rendering failed: {0}")]
    Render(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("Word document error: {0}")]
    Docx(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, WortwerkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_message_names_the_file() {
        let err = WortwerkError::Unlock {
            file: "statement.pdf".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to unlock PDF: statement.pdf. Check username/password."
        );
    }

    #[test]
    fn not_found_message_shows_path() {
        let err = WortwerkError::NotFound(PathBuf::from("/tmp/missing.pdf"));
        assert!(err.to_string().contains("/tmp/missing.pdf"));
    }
}
