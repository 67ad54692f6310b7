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

/// Errors raised while building the logging or metrics pipelines.
///
/// All of them happen at startup and are fatal for the process.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid export endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("Failed to build metric exporter: {0}")]
    BuildMetricExporter(String),
    #[error("Failed to install tracing subscriber: {0}")]
    InitSubscriber(String),
}
