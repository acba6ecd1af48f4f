// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer: owns the configuration and the OCR engine, and runs
// one conversion at a time on a background thread.
//
// The OCR engine is expensive to build (model loading), so it is created once
// in `init` and shared with every conversion through an `Arc`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{error, info};
use wortwerk_core::error::{Result, WortwerkError};
use wortwerk_core::{AppConfig, ObserverError, ProgressObserver};
use wortwerk_document::{Converter, TextRecognizer, build_recognizer};

use super::request::ConversionRequest;

/// Message from the worker thread to the UI.
#[derive(Debug)]
pub enum WorkerEvent {
    Progress(String),
    Finished(Result<PathBuf>),
}

/// Forwards progress lines into the UI channel. Fails once the UI side has
/// gone away.
struct ChannelObserver {
    tx: UnboundedSender<WorkerEvent>,
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, message: &str) -> std::result::Result<(), ObserverError> {
        self.tx
            .send(WorkerEvent::Progress(message.to_string()))
            .map_err(|_| "progress receiver dropped".into())
    }
}

/// Clears the busy flag when the worker ends, however it ends.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    config: Arc<AppConfig>,
    recognizer: Arc<dyn TextRecognizer>,
    busy: Arc<AtomicBool>,
}

impl AppServices {
    /// Build the services from a loaded configuration. Call once at startup.
    pub fn init(config: AppConfig) -> Self {
        let recognizer = build_recognizer(config.ocr_engine, config.ocr_model_dir.clone());
        info!(
            output_dir = %config.output_dir.display(),
            engine = recognizer.name(),
            "app services initialised"
        );
        Self::with_recognizer(config, recognizer)
    }

    pub fn with_recognizer(config: AppConfig, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self {
            config: Arc::new(config),
            recognizer,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn engine_name(&self) -> &'static str {
        self.recognizer.name()
    }

    /// Whether a conversion is currently running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Start converting `request` on a worker thread.
    ///
    /// Returns `Ok(None)` when another conversion is still running. The
    /// receiver yields progress lines and exactly one `Finished` event.
    pub fn start_conversion(
        &self,
        request: ConversionRequest,
    ) -> Result<Option<UnboundedReceiver<WorkerEvent>>> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Ok(None);
        }
        let guard = BusyGuard(Arc::clone(&self.busy));

        let converter = Converter::from_config(&self.config, Arc::clone(&self.recognizer));
        let options = request.options(self.config.min_text_threshold);
        let (tx, rx) = unbounded_channel();

        std::thread::Builder::new()
            .name("wortwerk-convert".into())
            .spawn(move || {
                let _guard = guard;
                let observer = ChannelObserver { tx: tx.clone() };

                let result = converter.convert(&request.pdf_path, &options, Some(&observer));
                match &result {
                    Ok(output) => info!(output = %output.display(), "conversion finished"),
                    Err(err) => error!(%err, path = %request.pdf_path.display(), "conversion failed"),
                }
                // The UI may have been closed; nothing left to tell.
                let _ = tx.send(WorkerEvent::Finished(result));
            })
            .map_err(WortwerkError::Io)?;

        Ok(Some(rx))
    }
}

#[cfg(test)]
mod tests {
    use wortwerk_document::UnavailableRecognizer;

    use super::*;

    fn services(dir: &Path) -> AppServices {
        AppServices::with_recognizer(
            AppConfig::for_base_dir(dir),
            Arc::new(UnavailableRecognizer::new("tests")),
        )
    }

    fn drain(mut rx: UnboundedReceiver<WorkerEvent>) -> (Vec<String>, Result<PathBuf>) {
        let mut progress = Vec::new();
        while let Some(event) = rx.blocking_recv() {
            match event {
                WorkerEvent::Progress(line) => progress.push(line),
                WorkerEvent::Finished(result) => return (progress, result),
            }
        }
        panic!("worker ended without a Finished event");
    }

    #[test]
    fn missing_file_reports_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let svc = services(dir.path());
        let request = ConversionRequest::from_form(
            &dir.path().join("missing.pdf").display().to_string(),
            "",
            "",
            "",
        )
        .unwrap();

        let rx = svc.start_conversion(request).unwrap().expect("not busy");
        let (progress, result) = drain(rx);

        assert!(progress.is_empty());
        assert!(matches!(result, Err(WortwerkError::NotFound(_))));
    }

    #[test]
    fn busy_flag_clears_after_worker_exits() {
        let dir = tempfile::tempdir().unwrap();
        let svc = services(dir.path());
        let garbage = dir.path().join("broken.pdf");
        std::fs::write(&garbage, b"not a pdf").unwrap();
        let request =
            ConversionRequest::from_form(&garbage.display().to_string(), "", "", "").unwrap();

        let rx = svc.start_conversion(request).unwrap().expect("not busy");
        let (progress, result) = drain(rx);

        assert_eq!(progress, vec!["Opening PDF: broken.pdf".to_string()]);
        assert!(matches!(result, Err(WortwerkError::Pdf(_))));
        // The guard drops after the final send; give the thread a moment.
        for _ in 0..100 {
            if !svc.is_busy() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        assert!(!svc.is_busy());
    }

    #[test]
    fn second_start_while_busy_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let svc = services(dir.path());
        svc.busy.store(true, Ordering::SeqCst);

        let request = ConversionRequest::from_form("x.pdf", "", "", "").unwrap();
        assert!(svc.start_conversion(request).unwrap().is_none());
    }
}
