// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Converter page: pick a PDF, optionally give credentials and an OCR
// language, convert, and watch progress.
//
// The conversion itself runs on the service layer's worker thread; this
// component only drains its event channel.

use dioxus::prelude::*;

use crate::services::app_services::{AppServices, WorkerEvent};
use crate::services::request::ConversionRequest;
use crate::state::{AppState, ConversionStatus};

const FIELD_STYLE: &str =
    "flex: 1; padding: 8px; border: 1px solid #ccc; border-radius: 6px; font-size: 14px;";
const LABEL_STYLE: &str = "width: 120px; color: #444; font-size: 14px;";
const ROW_STYLE: &str = "display: flex; align-items: center; gap: 8px; margin: 8px 0;";

#[component]
pub fn ConverterPage() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let running = state.read().is_running();
    let status = state.read().status.clone();
    let output_dir = svc.output_dir().display().to_string();
    let engine = svc.engine_name();

    rsx! {
        div {
            h1 { "PDF to Word Converter" }
            p { style: "color: #666;",
                "Converts each page's text into a Word document. Pages with little or no text are read with OCR."
            }

            // PDF path + browse
            div { style: ROW_STYLE,
                label { style: LABEL_STYLE, "PDF file" }
                input {
                    style: FIELD_STYLE,
                    placeholder: "/path/to/document.pdf",
                    value: "{state.read().pdf_path}",
                    disabled: running,
                    oninput: move |evt| state.write().pdf_path = evt.value(),
                }
                button {
                    style: "padding: 8px 16px; border-radius: 6px; border: 1px solid #007aff; color: #007aff; background: white;",
                    disabled: running,
                    onclick: move |_| {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("PDF files", &["pdf", "PDF"])
                            .pick_file()
                        {
                            tracing::info!(path = %path.display(), "PDF selected");
                            state.write().pdf_path = path.display().to_string();
                        }
                    },
                    "Browse..."
                }
            }

            div { style: ROW_STYLE,
                label { style: LABEL_STYLE, "Username" }
                input {
                    style: FIELD_STYLE,
                    placeholder: "optional",
                    value: "{state.read().username}",
                    disabled: running,
                    oninput: move |evt| state.write().username = evt.value(),
                }
            }

            div { style: ROW_STYLE,
                label { style: LABEL_STYLE, "Password" }
                input {
                    r#type: "password",
                    style: FIELD_STYLE,
                    placeholder: "optional",
                    value: "{state.read().password}",
                    disabled: running,
                    oninput: move |evt| state.write().password = evt.value(),
                }
            }

            div { style: ROW_STYLE,
                label { style: LABEL_STYLE, "OCR language" }
                input {
                    style: FIELD_STYLE,
                    value: "{state.read().ocr_language}",
                    disabled: running,
                    oninput: move |evt| state.write().ocr_language = evt.value(),
                }
                span { style: "color: #888; font-size: 12px;", "(e.g. 'eng', 'eng+spa')" }
            }

            button {
                style: "width: 100%; padding: 14px; margin-top: 12px; border-radius: 10px; border: none; background: #007aff; color: white; font-size: 16px; font-weight: bold;",
                disabled: running,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        if state.read().is_running() || svc.is_busy() {
                            state.write().reject("A conversion is already running. Please wait.");
                            return;
                        }

                        let request = {
                            let form = state.read();
                            ConversionRequest::from_form(
                                &form.pdf_path,
                                &form.username,
                                &form.password,
                                &form.ocr_language,
                            )
                        };
                        let request = match request {
                            Ok(request) => request,
                            Err(problem) => {
                                state.write().reject(problem.message());
                                return;
                            }
                        };

                        let mut events = match svc.start_conversion(request) {
                            Ok(Some(events)) => events,
                            Ok(None) => {
                                state.write().reject("A conversion is already running. Please wait.");
                                return;
                            }
                            Err(err) => {
                                tracing::error!(%err, "could not start conversion worker");
                                state.write().finish(Err(err));
                                return;
                            }
                        };

                        state.write().begin();
                        spawn(async move {
                            while let Some(event) = events.recv().await {
                                match event {
                                    WorkerEvent::Progress(line) => state.write().push_progress(line),
                                    WorkerEvent::Finished(result) => state.write().finish(result),
                                }
                            }
                        });
                    }
                },
                if running { "Converting..." } else { "Convert to Word" }
            }

            // Status
            {
                let color = match &status {
                    ConversionStatus::Failed { .. } => "#ff3b30",
                    ConversionStatus::Complete { .. } => "#34c759",
                    _ => "#666",
                };
                let label = status.label();
                rsx! {
                    p { style: "margin-top: 12px; font-size: 14px; color: {color};", "{label}" }
                }
            }
            if matches!(status, ConversionStatus::Complete { .. }) {
                p { style: "font-size: 13px; color: #888;", "Output folder: {output_dir}" }
            }

            // Progress log
            div { style: "margin-top: 8px; height: 220px; overflow-y: auto; border: 1px solid #e0e0e0; border-radius: 6px; padding: 8px; background: #fafafa; font-family: monospace; font-size: 12px;",
                for (i, line) in state.read().log.iter().enumerate() {
                    div { key: "{i}", "{line}" }
                }
            }

            p { style: "margin-top: 8px; color: #aaa; font-size: 11px;", "OCR engine: {engine}" }
        }
    }
}
