// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer: bridges the Dioxus UI to the conversion pipeline.
//
// The UI hands over a validated request; the services run it on a worker
// thread and stream progress back over a channel.

pub mod app_services;
pub mod request;
