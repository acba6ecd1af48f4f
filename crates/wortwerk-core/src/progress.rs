// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Progress observer capability injected into a conversion.

/// Error type an observer may return. The pipeline logs it and carries on.
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Receives human-readable status lines while a conversion runs.
///
/// Implementations must not assume they can stop the conversion: a returned
/// error (or a panic) is logged by the caller and otherwise ignored.
pub trait ProgressObserver {
    fn on_progress(&self, message: &str) -> Result<(), ObserverError>;
}

impl<F> ProgressObserver for F
where
    F: Fn(&str),
{
    fn on_progress(&self, message: &str) -> Result<(), ObserverError> {
        self(message);
        Ok(())
    }
}
