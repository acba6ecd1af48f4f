// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state: reactive signals for the Dioxus UI.

use std::path::PathBuf;

use wortwerk_core::config::DEFAULT_OCR_LANGUAGE;
use wortwerk_core::error::Result;
use wortwerk_core::human_errors::humanize_error;

/// Where the current (or last) conversion stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionStatus {
    /// Nothing started yet.
    Idle,
    /// Worker thread running.
    Running,
    /// Finished; the `.docx` lives at `output`.
    Complete { output: PathBuf },
    /// Finished with an error, already phrased for the user.
    Failed { message: String },
}

impl ConversionStatus {
    pub fn label(&self) -> String {
        match self {
            Self::Idle => "Ready.".to_string(),
            Self::Running => "Converting...".to_string(),
            Self::Complete { output } => format!("Conversion complete: {}", output.display()),
            Self::Failed { message } => format!("Error: {message}"),
        }
    }
}

/// Shared state accessible to all components via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub pdf_path: String,
    pub username: String,
    pub password: String,
    pub ocr_language: String,
    pub status: ConversionStatus,
    /// Progress lines of the current conversion, oldest first.
    pub log: Vec<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            pdf_path: String::new(),
            username: String::new(),
            password: String::new(),
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            status: ConversionStatus::Idle,
            log: Vec::new(),
        }
    }
}

impl AppState {
    pub fn is_running(&self) -> bool {
        self.status == ConversionStatus::Running
    }

    /// Reset the log for a new run.
    pub fn begin(&mut self) {
        self.log.clear();
        self.status = ConversionStatus::Running;
    }

    pub fn push_progress(&mut self, line: String) {
        self.log.push(line);
    }

    /// Record the worker's result. The password is cleared either way.
    pub fn finish(&mut self, result: Result<PathBuf>) {
        self.password.clear();
        self.status = match result {
            Ok(output) => ConversionStatus::Complete { output },
            Err(err) => ConversionStatus::Failed {
                message: humanize_error(&err).summary(),
            },
        };
    }

    /// Show a validation problem without touching the log.
    pub fn reject(&mut self, message: &str) {
        self.status = ConversionStatus::Failed {
            message: message.to_string(),
        };
    }
}
