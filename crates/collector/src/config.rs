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

use crate::error::ConfigError;
use shardmon_config::{
    DEFAULT_COLLECT_INTERVAL_SECS, DEFAULT_EXPORT_ENDPOINT, DEFAULT_EXPORT_INTERVAL_SECS, DEFAULT_METRICS_STDOUT,
    DEFAULT_MONITORED_INDICES, DEFAULT_SOURCE_ENDPOINT, ENVIRONMENT, EXPORT_TIMEOUT_SECS, HTTP_TIMEOUT_SECS, SERVICE_NAME,
    SERVICE_VERSION,
};
use shardmon_obs::OtelConfig;
use std::time::Duration;

/// Everything needed to build a [`ShardCollector`](crate::ShardCollector).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Base URL of the cluster's REST API.
    pub source_endpoint: String,
    /// OTLP/gRPC collector, `host:port` or URL.
    pub export_endpoint: String,
    /// Indices sampled every cycle, in order.
    pub indices: Vec<String>,
    /// Bound on every `_cat/shards` request.
    pub http_timeout: Duration,
    /// Period of the driver's collect ticker.
    pub collect_interval: Duration,
    /// Period of the metrics exporter.
    pub export_interval: Duration,
    pub service_name: String,
    pub environment: String,
    /// Mirror every export to stdout.
    pub metrics_stdout: bool,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            source_endpoint: DEFAULT_SOURCE_ENDPOINT.to_string(),
            export_endpoint: DEFAULT_EXPORT_ENDPOINT.to_string(),
            indices: DEFAULT_MONITORED_INDICES.iter().map(|index| index.to_string()).collect(),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            collect_interval: Duration::from_secs(DEFAULT_COLLECT_INTERVAL_SECS),
            export_interval: Duration::from_secs(DEFAULT_EXPORT_INTERVAL_SECS),
            service_name: SERVICE_NAME.to_string(),
            environment: ENVIRONMENT.to_string(),
            metrics_stdout: DEFAULT_METRICS_STDOUT,
        }
    }
}

impl CollectorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint("source"));
        }
        if self.export_endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint("export"));
        }
        if self.indices.is_empty() {
            return Err(ConfigError::NoIndices);
        }
        if self.indices.iter().any(|index| index.trim().is_empty()) {
            return Err(ConfigError::EmptyIndex);
        }
        for (name, value) in [
            ("http timeout", self.http_timeout),
            ("collect interval", self.collect_interval),
            ("export interval", self.export_interval),
        ] {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }
        Ok(())
    }

    /// Metrics pipeline settings derived from this config.
    pub fn otel_config(&self) -> OtelConfig {
        OtelConfig {
            endpoint: self.export_endpoint.clone(),
            meter_interval: Some(self.export_interval.as_secs().max(1)),
            export_timeout: Some(EXPORT_TIMEOUT_SECS),
            service_name: Some(self.service_name.clone()),
            service_version: Some(SERVICE_VERSION.to_string()),
            environment: Some(self.environment.clone()),
            use_stdout: Some(self.metrics_stdout),
        }
    }
}
