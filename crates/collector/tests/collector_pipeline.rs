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

//! End-to-end: mock `_cat/shards` server, HTTP fetcher, collector and an
//! in-memory metrics exporter.

use axum::Router;
use axum::extract::Path;
use axum::routing::get;
use opentelemetry_sdk::metrics::{InMemoryMetricExporter, SdkMeterProvider};
use opentelemetry_sdk::metrics::data::{AggregatedMetrics, MetricData};
use serde_json::{Value, json};
use shardmon_collector::{CollectorConfig, CollectorError, HttpShardFetcher, ShardCollector};
use shardmon_obs::{OtelConfig, build_meter_provider_with_exporter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const GAUGE: &str = "opensearch.shard.store.size";

struct Cluster {
    endpoint: String,
    logs_broken: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
}

async fn start_cluster() -> Cluster {
    let logs_broken = Arc::new(AtomicBool::new(false));
    let requests = Arc::new(AtomicUsize::new(0));
    let broken = logs_broken.clone();
    let served = requests.clone();
    let router = Router::new().route(
        "/_cat/shards/{index}",
        get(move |Path(index): Path<String>| {
            let broken = broken.clone();
            served.fetch_add(1, Ordering::SeqCst);
            async move {
                let body: Value = match index.as_str() {
                    "otlp-metrics" => json!([
                        {"index": "otlp-metrics", "shard": "0", "prirep": "p", "state": "STARTED", "docs": "42", "store": "512kb", "ip": "10.1.0.1", "node": "data-1"},
                        {"index": "otlp-metrics", "shard": "0", "prirep": "r", "state": "STARTED", "docs": "42", "store": "512kb", "ip": "10.1.0.2", "node": "data-2"},
                    ]),
                    "otlp-logs" if broken.load(Ordering::SeqCst) => json!({"error": "index_not_found_exception"}),
                    "otlp-logs" => json!([
                        {"index": "otlp-logs", "shard": "0", "prirep": "p", "state": "STARTED", "docs": "7", "store": "1.5gb", "ip": "10.1.0.1", "node": "data-1"},
                    ]),
                    _ => json!([]),
                };
                axum::Json(body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Cluster {
        endpoint: format!("http://{addr}"),
        logs_broken,
        requests,
    }
}

/// Sorted gauge values of the latest export the exporter holds.
fn last_export_values(exporter: &InMemoryMetricExporter) -> Vec<f64> {
    let finished = exporter.get_finished_metrics().unwrap();
    let mut values: Vec<f64> = finished
        .last()
        .into_iter()
        .flat_map(|rm| rm.scope_metrics())
        .flat_map(|scope| scope.metrics())
        .filter(|metric| metric.name() == GAUGE)
        .flat_map(|metric| match metric.data() {
            AggregatedMetrics::F64(MetricData::Gauge(gauge)) => gauge.data_points().map(|p| p.value()).collect::<Vec<_>>(),
            _ => Vec::new(),
        })
        .collect();
    values.sort_by(f64::total_cmp);
    values
}

fn exported_values(provider_flush: impl Fn(), exporter: &InMemoryMetricExporter) -> Vec<f64> {
    exporter.reset();
    provider_flush();
    last_export_values(exporter)
}

fn collector_for(cluster: &Cluster, indices: Vec<String>) -> (ShardCollector, SdkMeterProvider, InMemoryMetricExporter) {
    let exporter = InMemoryMetricExporter::default();
    let provider = build_meter_provider_with_exporter(&OtelConfig::default(), exporter.clone());
    let fetcher = HttpShardFetcher::new(cluster.endpoint.as_str(), Duration::from_secs(10)).unwrap();
    let collector = ShardCollector::with_parts(Arc::new(fetcher), indices, provider.clone()).unwrap();
    (collector, provider, exporter)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn collects_and_exports_shard_sizes() {
    let cluster = start_cluster().await;
    let (collector, provider, exporter) = collector_for(&cluster, CollectorConfig::default().indices);

    collector.collect(&CancellationToken::new()).unwrap();
    assert_eq!(cluster.requests.load(Ordering::SeqCst), 0);

    let values = exported_values(|| assert!(provider.force_flush().is_ok()), &exporter);
    assert_eq!(values, [524_288.0, 524_288.0, 1_610_612_736.0]);
    assert_eq!(cluster.requests.load(Ordering::SeqCst), 2);

    let values = exported_values(|| assert!(provider.force_flush().is_ok()), &exporter);
    assert_eq!(values.len(), 3);
    assert_eq!(cluster.requests.load(Ordering::SeqCst), 4);

    collector.shutdown().unwrap();
    let err = collector.collect(&CancellationToken::new()).unwrap_err();
    assert!(matches!(err, CollectorError::Registration(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_index_discards_the_whole_cycle() {
    let cluster = start_cluster().await;
    cluster.logs_broken.store(true, Ordering::SeqCst);
    let (collector, provider, exporter) =
        collector_for(&cluster, vec!["otlp-metrics".to_string(), "otlp-logs".to_string()]);
    collector.collect(&CancellationToken::new()).unwrap();

    assert!(exported_values(|| assert!(provider.force_flush().is_ok()), &exporter).is_empty());
    assert!(collector.snapshot().is_empty());

    cluster.logs_broken.store(false, Ordering::SeqCst);
    let values = exported_values(|| assert!(provider.force_flush().is_ok()), &exporter);
    assert_eq!(values.len(), 3);
    assert_eq!(collector.snapshot().len(), 3);

    collector.shutdown().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn cancelled_registration_fetches_nothing() {
    let cluster = start_cluster().await;
    let (collector, provider, exporter) = collector_for(&cluster, vec!["otlp-metrics".to_string()]);
    let cancel = CancellationToken::new();
    cancel.cancel();
    collector.collect(&cancel).unwrap();

    assert!(exported_values(|| assert!(provider.force_flush().is_ok()), &exporter).is_empty());
    assert_eq!(cluster.requests.load(Ordering::SeqCst), 0);

    collector.shutdown().unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn shutdown_flushes_a_fresh_sample() {
    let cluster = start_cluster().await;
    let (collector, _provider, exporter) =
        collector_for(&cluster, vec!["otlp-metrics".to_string(), "otlp-logs".to_string()]);
    collector.collect(&CancellationToken::new()).unwrap();

    collector.shutdown().unwrap();

    assert_eq!(last_export_values(&exporter), [524_288.0, 524_288.0, 1_610_612_736.0]);
    assert_eq!(cluster.requests.load(Ordering::SeqCst), 2);
}

#[test]
fn invalid_config_is_rejected_before_any_io() {
    let config = CollectorConfig {
        indices: Vec::new(),
        ..CollectorConfig::default()
    };
    assert!(matches!(ShardCollector::new(&config), Err(CollectorError::Config(_))));
}
