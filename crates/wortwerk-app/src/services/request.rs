// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Conversion request built from the form fields.

use std::path::PathBuf;

use wortwerk_core::{ConvertOptions, Credentials};

/// Form contents, normalised: blank optional fields become `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub pdf_path: PathBuf,
    pub credentials: Credentials,
    pub ocr_language: Option<String>,
}

/// Why a request was refused before starting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    MissingPath,
    NotPdf,
}

impl RequestError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::MissingPath => "Please select a PDF file.",
            Self::NotPdf => "The selected file is not a PDF. Choose a file ending in .pdf.",
        }
    }
}

fn optional(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ConversionRequest {
    /// Validate the raw form fields. Only the path is checked here; whether
    /// the file exists is decided by the converter.
    pub fn from_form(
        path: &str,
        username: &str,
        password: &str,
        language: &str,
    ) -> Result<Self, RequestError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(RequestError::MissingPath);
        }
        if !path.to_ascii_lowercase().ends_with(".pdf") {
            return Err(RequestError::NotPdf);
        }

        // Passwords may legitimately carry spaces; only blank ones are dropped.
        let password = (!password.trim().is_empty()).then(|| password.to_string());

        Ok(Self {
            pdf_path: PathBuf::from(path),
            credentials: Credentials::new(optional(username), password),
            ocr_language: optional(language),
        })
    }

    pub fn options(&self, min_text_threshold: usize) -> ConvertOptions {
        ConvertOptions {
            credentials: self.credentials.clone(),
            ocr_language: self.ocr_language.clone(),
            min_text_threshold,
        }
    }
}
