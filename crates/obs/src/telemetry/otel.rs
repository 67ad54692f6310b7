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

//! OpenTelemetry OTLP/gRPC metrics pipeline.
//!
//! Builds an [`SdkMeterProvider`] whose periodic reader pushes to an OTLP
//! collector over gRPC with gzip compression. An optional second reader
//! prints every export to stdout. The provider is returned to the caller
//! and never installed globally.

use crate::TelemetryError;
use crate::config::OtelConfig;
use crate::telemetry::resource::build_resource;
use opentelemetry_otlp::{Compression, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::metrics::exporter::PushMetricExporter;
use opentelemetry_sdk::metrics::{PeriodicReader, SdkMeterProvider, Temporality};
use shardmon_config::{DEFAULT_EXPORT_INTERVAL_SECS, DEFAULT_METRICS_STDOUT, EXPORT_TIMEOUT_SECS, HTTP_PREFIX, HTTPS_PREFIX};
use std::time::Duration;
use tracing::info;

/// Normalise an export endpoint into a URI tonic accepts.
///
/// A bare `host:port` gets an `http://` prefix so the channel is plaintext.
/// Explicit `http://` and `https://` endpoints are kept as given, minus any
/// trailing slash.
pub fn normalize_endpoint(endpoint: &str) -> Result<String, TelemetryError> {
    let endpoint = endpoint.trim().trim_end_matches('/');
    if endpoint.is_empty() {
        return Err(TelemetryError::InvalidEndpoint("endpoint is empty".to_string()));
    }
    if endpoint.starts_with(HTTP_PREFIX) || endpoint.starts_with(HTTPS_PREFIX) {
        Ok(endpoint.to_string())
    } else if endpoint.contains("://") {
        Err(TelemetryError::InvalidEndpoint(format!("unsupported scheme in '{endpoint}'")))
    } else {
        Ok(format!("{HTTP_PREFIX}{endpoint}"))
    }
}

/// Build a meter provider exporting over OTLP/gRPC to `config.endpoint`.
///
/// Must be called from within a Tokio runtime: the tonic channel is created
/// lazily on the current runtime.
///
/// # Errors
/// Returns [`TelemetryError`] if the endpoint is invalid or the exporter
/// cannot be constructed.
pub fn build_meter_provider(config: &OtelConfig) -> Result<SdkMeterProvider, TelemetryError> {
    let endpoint = normalize_endpoint(&config.endpoint)?;
    let timeout = Duration::from_secs(config.export_timeout.unwrap_or(EXPORT_TIMEOUT_SECS));

    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.clone())
        .with_timeout(timeout)
        .with_compression(Compression::Gzip)
        .with_temporality(Temporality::default())
        .build()
        .map_err(|e| TelemetryError::BuildMetricExporter(e.to_string()))?;

    let provider = build_meter_provider_with_exporter(config, exporter);
    info!(
        endpoint = %endpoint,
        interval_secs = config.meter_interval.unwrap_or(DEFAULT_EXPORT_INTERVAL_SECS),
        "Init metrics pipeline (OTLP/gRPC)"
    );
    Ok(provider)
}

/// Build a meter provider around an arbitrary push exporter.
///
/// Applies the same resource, export interval and optional stdout reader
/// as [`build_meter_provider`].
pub fn build_meter_provider_with_exporter<E>(config: &OtelConfig, exporter: E) -> SdkMeterProvider
where
    E: PushMetricExporter,
{
    let meter_interval = config.meter_interval.unwrap_or(DEFAULT_EXPORT_INTERVAL_SECS);
    let builder = SdkMeterProvider::builder().with_resource(build_resource(config)).with_reader(
        PeriodicReader::builder(exporter)
            .with_interval(Duration::from_secs(meter_interval))
            .build(),
    );

    if config.use_stdout.unwrap_or(DEFAULT_METRICS_STDOUT) {
        builder.with_reader(create_periodic_reader(meter_interval)).build()
    } else {
        builder.build()
    }
}

/// Create a stdout periodic metrics reader for the given interval.
fn create_periodic_reader(interval: u64) -> PeriodicReader<opentelemetry_stdout::MetricExporter> {
    PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default())
        .with_interval(Duration::from_secs(interval))
        .build()
}
