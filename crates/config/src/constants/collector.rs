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

use crate::HTTP_PREFIX;
use const_str::concat;

/// Port the monitoring API listens on in the default deployment
pub const DEFAULT_SOURCE_PORT: u16 = 3000;

/// Base URL of the cluster monitoring API
/// Default value: http://localhost:3000
/// Environment variable: SHARDMON_SOURCE_ENDPOINT
pub const DEFAULT_SOURCE_ENDPOINT: &str = concat!(HTTP_PREFIX, "localhost:", DEFAULT_SOURCE_PORT);

/// Standard OTLP/gRPC port
pub const DEFAULT_OTLP_GRPC_PORT: u16 = 4317;

/// Metrics backend target, `host:port` or a full URL
/// Default value: localhost:4317
/// Environment variable: SHARDMON_EXPORT_ENDPOINT
pub const DEFAULT_EXPORT_ENDPOINT: &str = concat!("localhost:", DEFAULT_OTLP_GRPC_PORT);

/// Timeout applied to every outbound `_cat/shards` request, in seconds
/// Default value: 10
pub const HTTP_TIMEOUT_SECS: u64 = 10;

/// Interval between two `collect` ticks of the driver, in seconds
/// Default value: 60
/// Environment variable: SHARDMON_COLLECT_INTERVAL
pub const DEFAULT_COLLECT_INTERVAL_SECS: u64 = 60;

/// Interval of the periodic metrics reader, in seconds
/// Default value: 10
/// Environment variable: SHARDMON_EXPORT_INTERVAL
pub const DEFAULT_EXPORT_INTERVAL_SECS: u64 = 10;

/// Timeout of a single OTLP export call, in seconds
pub const EXPORT_TIMEOUT_SECS: u64 = 10;

/// Indices sampled on every cycle
/// Environment variable: SHARDMON_INDICES (comma separated)
pub const DEFAULT_MONITORED_INDICES: [&str; 2] = ["otlp-metrics", "otlp-logs"];

/// Instrumentation scope of the collector's meter
pub const METER_SCOPE: &str = "opensearch.shards";

/// Name of the shard store size gauge
pub const SHARD_STORE_SIZE_GAUGE: &str = "opensearch.shard.store.size";

/// Unit of the shard store size gauge
pub const SHARD_STORE_SIZE_UNIT: &str = "bytes";

/// Description of the shard store size gauge
pub const SHARD_STORE_SIZE_DESCRIPTION: &str = "Size of the shard store in bytes";

/// Attribute keys attached to every shard observation
pub const LABEL_INDEX: &str = "index";
pub const LABEL_SHARD: &str = "shard";
pub const LABEL_PRIREP: &str = "prirep";
pub const LABEL_STATE: &str = "state";
pub const LABEL_NODE: &str = "node";
pub const LABEL_IP: &str = "ip";
