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

use shardmon_config::{
    DEFAULT_EXPORT_ENDPOINT, DEFAULT_EXPORT_INTERVAL_SECS, DEFAULT_LOG_JSON, DEFAULT_LOG_LEVEL, DEFAULT_METRICS_STDOUT, ENVIRONMENT,
    EXPORT_TIMEOUT_SECS, SERVICE_NAME, SERVICE_VERSION,
};

/// OpenTelemetry metrics pipeline configuration.
///
/// Optional fields fall back to the crate constants when the pipeline is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtelConfig {
    /// OTLP/gRPC collector address. A bare `host:port` is treated as plaintext `http://`.
    pub endpoint: String,
    /// Export interval in seconds.
    pub meter_interval: Option<u64>,
    /// Per-export timeout in seconds.
    pub export_timeout: Option<u64>,
    pub service_name: Option<String>,
    pub service_version: Option<String>,
    pub environment: Option<String>,
    /// Also print every export to stdout.
    pub use_stdout: Option<bool>,
}

impl Default for OtelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EXPORT_ENDPOINT.to_string(),
            meter_interval: Some(DEFAULT_EXPORT_INTERVAL_SECS),
            export_timeout: Some(EXPORT_TIMEOUT_SECS),
            service_name: Some(SERVICE_NAME.to_string()),
            service_version: Some(SERVICE_VERSION.to_string()),
            environment: Some(ENVIRONMENT.to_string()),
            use_stdout: Some(DEFAULT_METRICS_STDOUT),
        }
    }
}

/// Process logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Base level directive, overridden by `RUST_LOG` when set.
    pub level: String,
    /// Emit one JSON object per event instead of human-readable lines.
    pub json: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json: DEFAULT_LOG_JSON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otel_config_defaults() {
        let config = OtelConfig::default();
        assert_eq!(config.endpoint, "localhost:4317");
        assert_eq!(config.meter_interval, Some(10));
        assert_eq!(config.service_name.as_deref(), Some("opensearch-shard-collector"));
        assert_eq!(config.use_stdout, Some(false));
    }

    #[test]
    fn test_logger_config_defaults() {
        let config = LoggerConfig::default();
        assert_eq!(config.level, "info");
        assert!(!config.json);
    }
}
