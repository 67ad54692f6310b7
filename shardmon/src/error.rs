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

use shardmon_collector::CollectorError;
use shardmon_obs::TelemetryError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Fatal errors of the shardmon process.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Collector error: {0}")]
    Collector(#[from] CollectorError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
