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

//! Shard catalog retrieval from the cluster's `_cat/shards` API.

use crate::error::{CollectorError, Result};
use crate::record::ShardRecord;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Source of shard catalog rows.
#[async_trait]
pub trait ShardSource: Send + Sync {
    /// Fetch the rows of every index, in index order then response order.
    ///
    /// The first failing index aborts the whole fetch.
    async fn fetch_shard_info(&self, cancel: &CancellationToken, indices: &[String]) -> Result<Vec<ShardRecord>>;
}

/// [`ShardSource`] backed by `GET {endpoint}/_cat/shards/{index}?format=json`.
#[derive(Debug, Clone)]
pub struct HttpShardFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpShardFetcher {
    /// Build a fetcher with its own client bounded by `timeout` per request.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CollectorError::Client)?;
        Ok(Self::with_client(client, endpoint))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn shards_url(&self, index: &str) -> String {
        format!("{}/_cat/shards/{index}?format=json", self.endpoint)
    }

    async fn fetch_index(&self, cancel: &CancellationToken, index: &str) -> Result<Vec<ShardRecord>> {
        let url = self.shards_url(index);
        debug!(index, url = %url, "Fetching shard catalog");

        let request = async {
            let response = self.client.get(&url).send().await?;
            response.bytes().await
        };

        let body = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                return Err(CollectorError::Cancelled { index: index.to_string() });
            }
            result = request => result.map_err(|source| CollectorError::Fetch {
                index: index.to_string(),
                source,
            })?,
        };

        let records = serde_json::from_slice::<Vec<ShardRecord>>(&body).map_err(|source| CollectorError::Decode {
            index: index.to_string(),
            source,
        })?;
        debug!(index, shards = records.len(), "Decoded shard catalog");
        Ok(records)
    }
}

#[async_trait]
impl ShardSource for HttpShardFetcher {
    async fn fetch_shard_info(&self, cancel: &CancellationToken, indices: &[String]) -> Result<Vec<ShardRecord>> {
        let mut all_shards = Vec::new();
        for index in indices {
            all_shards.extend(self.fetch_index(cancel, index).await?);
        }
        Ok(all_shards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::{Path, Query};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use serde_json::json;
    use std::collections::HashMap;
    use std::time::Instant;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn cat_shards(Path(index): Path<String>, Query(params): Query<HashMap<String, String>>) -> Response {
        if params.get("format").map(String::as_str) != Some("json") {
            return (StatusCode::BAD_REQUEST, "format=json required").into_response();
        }
        let body = match index.as_str() {
            "otlp-metrics" => json!([
                {"index": "otlp-metrics", "shard": "0", "prirep": "p", "state": "STARTED", "docs": "10", "store": "512kb", "ip": "10.0.0.1", "node": "n1"},
                {"index": "otlp-metrics", "shard": "0", "prirep": "r", "state": "STARTED", "docs": "10", "store": "510kb", "ip": "10.0.0.2", "node": "n2"},
            ]),
            "otlp-logs" => json!([
                {"index": "otlp-logs", "shard": "0", "prirep": "p", "state": "STARTED", "docs": "99", "store": "1.5gb", "ip": "10.0.0.1", "node": "n1"},
                {"index": "otlp-logs", "shard": "1", "prirep": "r", "state": "UNASSIGNED", "docs": null, "store": null, "ip": null, "node": null},
            ]),
            "empty" => json!([]),
            "broken" => return (StatusCode::OK, "{\"not\": \"an array\"}").into_response(),
            _ => return (StatusCode::NOT_FOUND, "index_not_found_exception").into_response(),
        };
        axum::Json(body).into_response()
    }

    fn router() -> Router {
        Router::new().route("/_cat/shards/{index}", get(cat_shards))
    }

    fn indices(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[tokio::test]
    async fn test_fetch_preserves_index_then_response_order() {
        let endpoint = serve(router()).await;
        let fetcher = HttpShardFetcher::new(format!("{endpoint}/"), Duration::from_secs(10)).unwrap();
        assert_eq!(fetcher.endpoint(), endpoint);

        let records = fetcher
            .fetch_shard_info(&CancellationToken::new(), &indices(&["otlp-metrics", "otlp-logs", "empty"]))
            .await
            .unwrap();

        let order: Vec<(&str, &str, &str)> = records
            .iter()
            .map(|r| (r.index_name.as_str(), r.shard_id.as_str(), r.role.as_str()))
            .collect();
        assert_eq!(
            order,
            [
                ("otlp-metrics", "0", "p"),
                ("otlp-metrics", "0", "r"),
                ("otlp-logs", "0", "p"),
                ("otlp-logs", "1", "r"),
            ]
        );
        assert_eq!(records[1].store_size, "510kb");
    }

    #[tokio::test]
    async fn test_fetch_null_fields_decode_as_empty() {
        let endpoint = serve(router()).await;
        let fetcher = HttpShardFetcher::new(endpoint, Duration::from_secs(10)).unwrap();
        let records = fetcher
            .fetch_shard_info(&CancellationToken::new(), &indices(&["otlp-logs"]))
            .await
            .unwrap();
        let unassigned = &records[1];
        assert_eq!(unassigned.state, "UNASSIGNED");
        assert_eq!(unassigned.store_size, "");
        assert_eq!(unassigned.node_name, "");
        assert_eq!(unassigned.document_count, "");
    }

    #[tokio::test]
    async fn test_fetch_decode_failure_names_index() {
        let endpoint = serve(router()).await;
        let fetcher = HttpShardFetcher::new(endpoint, Duration::from_secs(10)).unwrap();

        let err = fetcher
            .fetch_shard_info(&CancellationToken::new(), &indices(&["otlp-metrics", "broken", "otlp-logs"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CollectorError::Decode { ref index, .. } if index == "broken"));

        // Status codes are not inspected, a 404 body simply fails to decode.
        let err = fetcher
            .fetch_shard_info(&CancellationToken::new(), &indices(&["missing"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CollectorError::Decode { ref index, .. } if index == "missing"));
    }

    #[tokio::test]
    async fn test_fetch_cancellation_aborts_in_flight_request() {
        let slow = Router::new().route(
            "/_cat/shards/{index}",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                axum::Json(json!([]))
            }),
        );
        let endpoint = serve(slow).await;
        let fetcher = HttpShardFetcher::new(endpoint, Duration::from_secs(60)).unwrap();

        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let err = fetcher
            .fetch_shard_info(&cancel, &indices(&["otlp-metrics"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CollectorError::Cancelled { ref index } if index == "otlp-metrics"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_fetch_with_cancelled_token_does_not_request() {
        let fetcher = HttpShardFetcher::new("http://127.0.0.1:9", Duration::from_secs(10)).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = fetcher.fetch_shard_info(&cancel, &indices(&["a", "b"])).await.unwrap_err();
        assert_eq!(err.index(), Some("a"));
        assert!(matches!(err, CollectorError::Cancelled { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = HttpShardFetcher::new(format!("http://{addr}"), Duration::from_secs(10)).unwrap();
        let err = fetcher
            .fetch_shard_info(&CancellationToken::new(), &indices(&["otlp-metrics"]))
            .await
            .unwrap_err();
        assert!(matches!(err, CollectorError::Fetch { .. }));
        assert!(err.is_transport_error());
        assert_eq!(err.index(), Some("otlp-metrics"));
    }

    #[tokio::test]
    async fn test_fetch_slow_server_times_out() {
        let router = Router::new().route(
            "/_cat/shards/{index}",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                axum::Json(json!([]))
            }),
        );
        let endpoint = serve(router).await;
        let fetcher = HttpShardFetcher::new(endpoint, Duration::from_millis(200)).unwrap();

        let started = Instant::now();
        let err = fetcher
            .fetch_shard_info(&CancellationToken::new(), &indices(&["otlp-logs"]))
            .await
            .unwrap_err();
        assert!(started.elapsed() < Duration::from_secs(5));
        match err {
            CollectorError::Fetch { ref index, ref source } => {
                assert_eq!(index, "otlp-logs");
                assert!(source.is_timeout(), "expected a timeout, got {source}");
            }
            other => panic!("expected a fetch error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_no_indices_is_empty() {
        let fetcher = HttpShardFetcher::new("http://127.0.0.1:9", Duration::from_secs(10)).unwrap();
        let records = fetcher.fetch_shard_info(&CancellationToken::new(), &[]).await.unwrap();
        assert!(records.is_empty());
    }
}
