// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared request types passed from the UI layer into the conversion pipeline.

use std::fmt;

use crate::config::DEFAULT_MIN_TEXT_THRESHOLD;

/// Optional credentials for an encrypted PDF. Never persisted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub fn new(username: Option<String>, password: Option<String>) -> Self {
        Self { username, password }
    }

    /// No username or password supplied.
    pub fn none() -> Self {
        Self::default()
    }
}

// Hand-written so secrets never reach a log line.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username.as_ref().map(|_| "<set>"))
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Per-conversion options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Credentials tried when the PDF is encrypted.
    pub credentials: Credentials,
    /// OCR language code (e.g. `eng`, `eng+spa`); `None` uses the default.
    pub ocr_language: Option<String>,
    /// Pages whose trimmed direct text is shorter than this are OCR'd.
    pub min_text_threshold: usize,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            credentials: Credentials::none(),
            ocr_language: None,
            min_text_threshold: DEFAULT_MIN_TEXT_THRESHOLD,
        }
    }
}

impl ConvertOptions {
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_ocr_language(mut self, language: impl Into<String>) -> Self {
        self.ocr_language = Some(language.into());
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.min_text_threshold = threshold;
        self
    }
}
