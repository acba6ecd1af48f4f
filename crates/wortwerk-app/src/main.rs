// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Wortwerk: PDF to Word converter.
//
// Entry point. Loads configuration, initialises logging and the OCR engine,
// and launches the Dioxus UI.

mod logging;
mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::converter::ConverterPage;
use services::app_services::AppServices;
use wortwerk_core::AppConfig;
use wortwerk_core::config::base_dir;

fn main() {
    let base = base_dir();
    let config = AppConfig::load_or_default(&base);
    logging::init(&config);

    tracing::info!(base = %base.display(), "Wortwerk starting");

    let svc = AppServices::init(config);
    dioxus::LaunchBuilder::new().with_context(svc).launch(app);
}

/// Root component.
fn app() -> Element {
    use_context_provider(|| Signal::new(state::AppState::default()));

    rsx! {
        div { class: "app-container",
            style: "max-width: 720px; margin: 0 auto; padding: 16px; font-family: system-ui, -apple-system, sans-serif;",
            ConverterPage {}
        }
    }
}
