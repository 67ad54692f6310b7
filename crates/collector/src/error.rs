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

use shardmon_obs::TelemetryError;
use std::num::ParseFloatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectorError>;

/// Errors raised while sampling shards or driving the metrics pipeline.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Store size without a `kb`, `mb` or `gb` suffix. Carries the raw input.
    #[error("unknown size unit in: {0}")]
    UnknownUnit(String),

    /// Store size whose numeric part is not a float.
    #[error("failed to parse size value '{value}': {source}")]
    MalformedNumber {
        value: String,
        #[source]
        source: ParseFloatError,
    },

    /// Transport or body read failure.
    #[error("failed to fetch shards of index '{index}': {source}")]
    Fetch {
        index: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request was aborted by its cancellation token.
    #[error("fetching shards of index '{index}' was cancelled")]
    Cancelled { index: String },

    /// Response body is not a JSON array of shard records.
    #[error("failed to decode shards of index '{index}': {source}")]
    Decode {
        index: String,
        #[source]
        source: serde_json::Error,
    },

    /// The metrics pipeline no longer accepts observations.
    #[error("gauge registration rejected: {0}")]
    Registration(String),

    /// HTTP client construction failed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error(transparent)]
    Telemetry(#[from] TelemetryError),

    #[error("meter provider shutdown failed: {0}")]
    Shutdown(String),

    /// The sampling thread could not be started or is gone.
    #[error("sampler worker unavailable: {0}")]
    Worker(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CollectorError {
    /// Check if the error comes from a store size string
    pub fn is_parse_error(&self) -> bool {
        matches!(self, CollectorError::UnknownUnit(_) | CollectorError::MalformedNumber { .. })
    }

    /// Check if the error comes from talking to the cluster
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            CollectorError::Fetch { .. } | CollectorError::Cancelled { .. } | CollectorError::Decode { .. }
        )
    }

    /// Index whose fetch failed, if any
    pub fn index(&self) -> Option<&str> {
        match self {
            CollectorError::Fetch { index, .. } | CollectorError::Cancelled { index } | CollectorError::Decode { index, .. } => {
                Some(index)
            }
            _ => None,
        }
    }
}

/// Invalid collector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} endpoint must not be empty")]
    EmptyEndpoint(&'static str),

    #[error("at least one index must be monitored")]
    NoIndices,

    #[error("monitored index names must not be empty")]
    EmptyIndex,

    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}
