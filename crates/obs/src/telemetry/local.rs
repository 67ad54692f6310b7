// Copyright 2024 RustFS Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Stdout logging backend.
//!
//! | `LoggerConfig::json` | Output                                         |
//! |----------------------|------------------------------------------------|
//! | `false`              | human-readable lines, ANSI colour on a terminal |
//! | `true`               | one JSON object per event with span context     |

use crate::TelemetryError;
use crate::config::LoggerConfig;
use crate::telemetry::filter::build_env_filter;
use std::io::IsTerminal;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt::time::LocalTime, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber writing to stdout.
///
/// # Errors
/// Returns [`TelemetryError::InitSubscriber`] if a global subscriber is
/// already installed.
pub fn init_logging(config: &LoggerConfig) -> Result<(), TelemetryError> {
    let json_layer = config.json.then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(LocalTime::rfc_3339())
            .with_target(true)
            .with_ansi(false)
            .with_thread_names(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_current_span(true)
            .with_span_list(true)
    });
    let text_layer = (!config.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_timer(LocalTime::rfc_3339())
            .with_target(true)
            .with_ansi(std::io::stdout().is_terminal())
            .with_thread_names(true)
    });

    tracing_subscriber::registry()
        .with(build_env_filter(&config.level))
        .with(ErrorLayer::default())
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::InitSubscriber(e.to_string()))?;

    info!(level = %config.level, json = config.json, "Init stdout logging");
    Ok(())
}
