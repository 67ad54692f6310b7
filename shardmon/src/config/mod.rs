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

use clap::Parser;
use shardmon_collector::CollectorConfig;
use shardmon_config::{
    APP_NAME, DEFAULT_COLLECT_INTERVAL_SECS, DEFAULT_EXPORT_ENDPOINT, DEFAULT_EXPORT_INTERVAL_SECS, DEFAULT_LOG_LEVEL,
    DEFAULT_MONITORED_INDICES, DEFAULT_SOURCE_ENDPOINT, ENV_COLLECT_INTERVAL, ENV_ENVIRONMENT, ENV_EXPORT_ENDPOINT,
    ENV_EXPORT_INTERVAL, ENV_INDICES, ENV_LOG_JSON, ENV_LOG_LEVEL, ENV_METRICS_STDOUT, ENV_SERVICE_NAME, ENV_SOURCE_ENDPOINT,
    ENVIRONMENT, HTTP_TIMEOUT_SECS, SERVICE_NAME, VERSION,
};
use shardmon_obs::LoggerConfig;
use std::time::Duration;


#[derive(Debug, Clone, Parser)]
#[command(name = APP_NAME, version = VERSION, about = "Republish OpenSearch shard store sizes as OTLP gauges")]
pub struct Opt {
    /// Base URL of the OpenSearch REST API.
    #[arg(long, env = ENV_SOURCE_ENDPOINT, default_value = DEFAULT_SOURCE_ENDPOINT)]
    pub source_endpoint: String,

    /// OTLP/gRPC collector, `host:port` (plaintext) or a full URL.
    #[arg(long, env = ENV_EXPORT_ENDPOINT, default_value = DEFAULT_EXPORT_ENDPOINT)]
    pub export_endpoint: String,

    /// Indices to sample, comma separated.
    #[arg(
        long,
        env = ENV_INDICES,
        value_delimiter = ',',
        default_values_t = DEFAULT_MONITORED_INDICES.map(String::from)
    )]
    pub indices: Vec<String>,

    /// Seconds between two samples.
    #[arg(
        long,
        env = ENV_COLLECT_INTERVAL,
        default_value_t = DEFAULT_COLLECT_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub collect_interval: u64,

    /// Seconds between two metric exports.
    #[arg(
        long,
        env = ENV_EXPORT_INTERVAL,
        default_value_t = DEFAULT_EXPORT_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub export_interval: u64,

    #[arg(long, env = ENV_SERVICE_NAME, default_value = SERVICE_NAME)]
    pub service_name: String,

    /// Deployment environment reported on the metrics resource.
    #[arg(long, env = ENV_ENVIRONMENT, default_value = ENVIRONMENT)]
    pub environment: String,

    /// Log level, overridden by RUST_LOG when set.
    #[arg(long, env = ENV_LOG_LEVEL, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Log one JSON object per line.
    #[arg(long, env = ENV_LOG_JSON)]
    pub log_json: bool,

    /// Also print every metrics export to stdout.
    #[arg(long, env = ENV_METRICS_STDOUT)]
    pub metrics_stdout: bool,
}

impl Opt {
    pub fn logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: self.log_level.clone(),
            json: self.log_json,
        }
    }

    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            source_endpoint: self.source_endpoint.trim().to_string(),
            export_endpoint: self.export_endpoint.trim().to_string(),
            indices: self
                .indices
                .iter()
                .map(|index| index.trim())
                .filter(|index| !index.is_empty())
                .map(String::from)
                .collect(),
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            collect_interval: Duration::from_secs(self.collect_interval),
            export_interval: Duration::from_secs(self.export_interval),
            service_name: self.service_name.clone(),
            environment: self.environment.clone(),
            metrics_stdout: self.metrics_stdout,
        }
    }
}
