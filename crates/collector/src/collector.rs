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

//! Composition root: sampling worker, owned meter provider and the store
//! size gauge.

use crate::config::CollectorConfig;
use crate::error::{CollectorError, Result};
use crate::fetcher::{HttpShardFetcher, ShardSource};
use crate::record::ShardMeasurement;
use crate::sampler::ShardSampler;
use crate::worker::SampleWorker;
use arc_swap::{ArcSwap, ArcSwapOption};
use opentelemetry::metrics::{MeterProvider, ObservableGauge};
use opentelemetry_sdk::metrics::SdkMeterProvider;
use shardmon_config::{METER_SCOPE, SHARD_STORE_SIZE_DESCRIPTION, SHARD_STORE_SIZE_GAUGE, SHARD_STORE_SIZE_UNIT};
use shardmon_obs::build_meter_provider;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Publishes the `opensearch.shard.store.size` gauge.
///
/// The gauge callback is created once, at construction, and stays idle
/// until [`collect`](Self::collect) registers it. From then on every
/// export cycle runs exactly one fresh fetch of all monitored indices and
/// observes its result. A cycle in which any index fails observes nothing.
pub struct ShardCollector {
    provider: SdkMeterProvider,
    worker: Arc<SampleWorker>,
    registration: Arc<ArcSwapOption<CancellationToken>>,
    last_sample: Arc<ArcSwap<Vec<ShardMeasurement>>>,
    _gauge: ObservableGauge<f64>,
    shut_down: AtomicBool,
}

impl ShardCollector {
    /// Build the HTTP fetcher and the OTLP pipeline described by `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &CollectorConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpShardFetcher::new(config.source_endpoint.as_str(), config.http_timeout)?;
        let provider = build_meter_provider(&config.otel_config())?;
        info!(
            source = %fetcher.endpoint(),
            export = %config.export_endpoint,
            indices = ?config.indices,
            "Shard collector created"
        );
        Self::with_parts(Arc::new(fetcher), config.indices.clone(), provider)
    }

    /// Assemble a collector from an arbitrary source and meter provider.
    pub fn with_parts(source: Arc<dyn ShardSource>, indices: Vec<String>, provider: SdkMeterProvider) -> Result<Self> {
        let worker = Arc::new(SampleWorker::spawn(ShardSampler::new(source, indices))?);
        let registration: Arc<ArcSwapOption<CancellationToken>> = Arc::new(ArcSwapOption::empty());
        let last_sample = Arc::new(ArcSwap::from_pointee(Vec::new()));

        let gauge = provider
            .meter(METER_SCOPE)
            .f64_observable_gauge(SHARD_STORE_SIZE_GAUGE)
            .with_description(SHARD_STORE_SIZE_DESCRIPTION)
            .with_unit(SHARD_STORE_SIZE_UNIT)
            .with_callback({
                let worker = Arc::clone(&worker);
                let registration = Arc::clone(&registration);
                let last_sample = Arc::clone(&last_sample);
                move |observer| {
                    let Some(cancel) = registration.load_full() else {
                        return;
                    };
                    match worker.sample_blocking(&cancel) {
                        Ok(measurements) => {
                            for measurement in &measurements {
                                observer.observe(measurement.bytes, &measurement.labels.to_attributes());
                            }
                            debug!(observed = measurements.len(), "Observed shard store sizes");
                            last_sample.store(Arc::new(measurements));
                        }
                        Err(err) => {
                            last_sample.store(Arc::new(Vec::new()));
                            error!(error = %err, index = err.index(), "Failed to collect metrics");
                        }
                    }
                }
            })
            .build();

        Ok(Self {
            provider,
            worker,
            registration,
            last_sample,
            _gauge: gauge,
            shut_down: AtomicBool::new(false),
        })
    }

    /// Register the gauge callback and return without fetching.
    ///
    /// `cancel` is captured by the callback and aborts the fetches of later
    /// export cycles once cancelled. Calling again replaces the token; the
    /// gauge still observes each shard once per cycle.
    pub fn collect(&self, cancel: &CancellationToken) -> Result<()> {
        if self.shut_down.load(Ordering::Acquire) {
            return Err(CollectorError::Registration("collector has been shut down".to_string()));
        }
        self.registration.store(Some(Arc::new(cancel.clone())));
        debug!("Shard store size callback registered");
        Ok(())
    }

    /// Measurements observed by the most recent export cycle.
    ///
    /// Empty before the first cycle and after a failed one.
    pub fn snapshot(&self) -> Arc<Vec<ShardMeasurement>> {
        self.last_sample.load_full()
    }

    /// Flush a final export and shut the meter provider down.
    ///
    /// The final export fetches like any other cycle, so a registered
    /// cancellation token must still be live for it to carry data. After
    /// this, [`collect`](Self::collect) fails with
    /// [`CollectorError::Registration`].
    pub fn shutdown(&self) -> Result<()> {
        if self.shut_down.swap(true, Ordering::AcqRel) {
            warn!("Shard collector shutdown called more than once");
        }
        let flushed = self.provider.shutdown();
        self.registration.store(None);
        self.worker.stop();
        flushed.map_err(|e| CollectorError::Shutdown(e.to_string()))?;
        info!("Shard collector shut down");
        Ok(())
    }
}
