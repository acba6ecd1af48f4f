// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Progress fan-out: every notice goes to the log and, when present, to the
// caller's observer. Observer failures stop here.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{error, info};
use wortwerk_core::ProgressObserver;

/// Emits progress notices for one conversion.
#[derive(Clone, Copy)]
pub struct Progress<'a> {
    observer: Option<&'a dyn ProgressObserver>,
}

impl<'a> Progress<'a> {
    pub fn new(observer: Option<&'a dyn ProgressObserver>) -> Self {
        Self { observer }
    }

    /// Log-only progress.
    pub fn silent() -> Self {
        Self { observer: None }
    }

    /// Log `message` and deliver it to the observer. Never fails.
    pub fn emit(&self, message: &str) {
        info!("{message}");

        let Some(observer) = self.observer else {
            return;
        };

        match catch_unwind(AssertUnwindSafe(|| observer.on_progress(message))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => error!(%err, "Progress callback failed."),
            Err(_) => error!("Progress callback panicked."),
        }
    }
}
