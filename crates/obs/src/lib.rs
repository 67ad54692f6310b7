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

//! # shardmon observability
//!
//! Sets up the two ambient pipelines of the collector process:
//!
//! - **Logging**: a `tracing-subscriber` registry with an env filter, an
//!   error layer and either a human-readable or a JSON formatter
//!   ([`init_logging`]).
//! - **Metrics**: an owned [`SdkMeterProvider`](opentelemetry_sdk::metrics::SdkMeterProvider)
//!   exporting over OTLP/gRPC on a fixed interval ([`build_meter_provider`]).
//!
//! Nothing here installs a global meter provider. The provider is returned
//! to the caller, who owns it and is responsible for shutting it down.
//!
//! ## Usage
//!
//! ```no_run
//! use shardmon_obs::{LoggerConfig, OtelConfig, build_meter_provider, init_logging};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), shardmon_obs::TelemetryError> {
//! init_logging(&LoggerConfig::default())?;
//! let provider = build_meter_provider(&OtelConfig::default())?;
//! // ... register instruments against `provider` ...
//! let _ = provider.shutdown();
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod telemetry;
mod utils;

pub use config::{LoggerConfig, OtelConfig};
pub use error::TelemetryError;
pub use telemetry::{build_meter_provider, build_meter_provider_with_exporter, init_logging, normalize_endpoint};
