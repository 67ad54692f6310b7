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

/// Application name
/// Default value: shardmon
pub const APP_NAME: &str = "shardmon";

/// Application version
/// Default value: 1.0.0
pub const VERSION: &str = "1.0.0";

/// Service name reported in the OpenTelemetry resource
/// Default value: opensearch-shard-collector
/// Environment variable: SHARDMON_SERVICE_NAME
pub const SERVICE_NAME: &str = "opensearch-shard-collector";

/// Service version reported in the OpenTelemetry resource
/// Uses the same value as VERSION constant
pub const SERVICE_VERSION: &str = VERSION;

/// Default deployment environment
/// Default value: production
/// Environment variable: SHARDMON_ENVIRONMENT
pub const ENVIRONMENT: &str = "production";

/// Default logger level
/// Default value: info
/// Environment variable: SHARDMON_LOG_LEVEL
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default structured (JSON) logging switch
/// Default value: false
/// Environment variable: SHARDMON_LOG_JSON
pub const DEFAULT_LOG_JSON: bool = false;

/// Default stdout metrics mirror switch
/// When enabled, every export is also printed by the stdout exporter.
/// Default value: false
/// Environment variable: SHARDMON_METRICS_STDOUT
pub const DEFAULT_METRICS_STDOUT: bool = false;

/// Plain HTTP scheme prefix
/// Used to turn a bare `host:port` export target into an insecure endpoint URL.
pub const HTTP_PREFIX: &str = "http://";

/// TLS HTTP scheme prefix
pub const HTTPS_PREFIX: &str = "https://";
