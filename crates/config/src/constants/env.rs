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

use const_str::concat;

/// Prefix shared by every shardmon environment variable
pub const ENV_PREFIX: &str = "SHARDMON_";

pub const ENV_SOURCE_ENDPOINT: &str = concat!(ENV_PREFIX, "SOURCE_ENDPOINT");
pub const ENV_EXPORT_ENDPOINT: &str = concat!(ENV_PREFIX, "EXPORT_ENDPOINT");
pub const ENV_INDICES: &str = concat!(ENV_PREFIX, "INDICES");
pub const ENV_COLLECT_INTERVAL: &str = concat!(ENV_PREFIX, "COLLECT_INTERVAL");
pub const ENV_EXPORT_INTERVAL: &str = concat!(ENV_PREFIX, "EXPORT_INTERVAL");
pub const ENV_SERVICE_NAME: &str = concat!(ENV_PREFIX, "SERVICE_NAME");
pub const ENV_ENVIRONMENT: &str = concat!(ENV_PREFIX, "ENVIRONMENT");
pub const ENV_LOG_LEVEL: &str = concat!(ENV_PREFIX, "LOG_LEVEL");
pub const ENV_LOG_JSON: &str = concat!(ENV_PREFIX, "LOG_JSON");
pub const ENV_METRICS_STDOUT: &str = concat!(ENV_PREFIX, "METRICS_STDOUT");
