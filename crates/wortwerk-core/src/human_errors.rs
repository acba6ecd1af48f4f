// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the conversion UI.
//
// Bad paths and bad credentials are things the user can fix, so they get an
// actionable suggestion. Anything else carries the technical detail so it can
// be pasted into a bug report.

use crate::error::WortwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Worth trying again as-is (busy disk, transient I/O).
    Transient,
    /// User must change something (pick another file, fix the password).
    ActionRequired,
    /// The input cannot be converted; retrying will not help.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether simply trying again may succeed.
    pub retriable: bool,
    /// Severity level (drives colour in the UI).
    pub severity: Severity,
}

impl HumanError {
    /// Single-line rendering for dialogs and the progress log.
    pub fn summary(&self) -> String {
        format!("{} {}", self.message, self.suggestion)
    }
}

/// Convert a `WortwerkError` into a `HumanError` for display.
pub fn humanize_error(err: &WortwerkError) -> HumanError {
    match err {
        WortwerkError::NotFound(path) => HumanError {
            message: "The PDF file couldn't be found.".into(),
            suggestion: format!(
                "Check the path and choose the file again. ({})",
                path.display()
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        WortwerkError::Unlock { file } => HumanError {
            message: format!("\"{file}\" is password protected and couldn't be unlocked."),
            suggestion: "Check the username and password, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        WortwerkError::Pdf(detail) => HumanError {
            message: "There's a problem with this PDF file.".into(),
            suggestion: format!(
                "The file may be damaged. Try opening it in a PDF viewer first. (Detail: {detail})"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        WortwerkError::Render(detail) | WortwerkError::Ocr(detail) => HumanError {
            message: "Text recognition didn't work on this document.".into(),
            suggestion: format!(
                "Check that the OCR engine and its language data are installed. (Detail: {detail})"
            ),
            retriable: false,
            severity: Severity::Permanent,
        },

        WortwerkError::Docx(detail) => HumanError {
            message: "The Word document couldn't be written.".into(),
            suggestion: format!(
                "Close the document if it is open in another program and try again. (Detail: {detail})"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        WortwerkError::Config(detail) => HumanError {
            message: "The settings file has a problem.".into(),
            suggestion: format!("Fix or delete wortwerk.json and restart. (Detail: {detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        WortwerkError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "A file couldn't be found.".into(),
                suggestion: "It may have been moved or deleted. Try choosing the file again.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "The app doesn't have permission to use that location.".into(),
                suggestion: "Check the file and output folder permissions.".into(),
                retriable: false,
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: format!("Try again. If this keeps happening, the disk may be full. ({io_err})"),
                retriable: true,
                severity: Severity::Transient,
            },
        },

        WortwerkError::Serialization(detail) => HumanError {
            message: "The app had an internal data problem.".into(),
            suggestion: format!("Try again. If this keeps happening, please report it. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
