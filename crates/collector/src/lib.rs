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

//! # shardmon collector
//!
//! Samples the store size of every shard copy of a set of OpenSearch
//! indices through `_cat/shards` and republishes it as the
//! `opensearch.shard.store.size` gauge (unit `bytes`).
//!
//! [`ShardCollector::collect`] registers the gauge callback and returns
//! at once. Every export cycle of the meter provider then runs the
//! callback, which fetches ([`HttpShardFetcher`]) and parses
//! ([`parse_store_size`]) every monitored index afresh and observes the
//! result, or nothing if any index failed.
//!
//! ```no_run
//! use shardmon_collector::{CollectorConfig, ShardCollector};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main]
//! # async fn main() -> shardmon_collector::Result<()> {
//! let collector = ShardCollector::new(&CollectorConfig::default())?;
//! collector.collect(&CancellationToken::new())?;
//! tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//! collector.shutdown()?;
//! # Ok(())
//! # }
//! ```

mod collector;
mod config;
mod error;
mod fetcher;
mod record;
mod sampler;
mod size;
mod worker;

pub use collector::ShardCollector;
pub use config::CollectorConfig;
pub use error::{CollectorError, ConfigError, Result};
pub use fetcher::{HttpShardFetcher, ShardSource};
pub use record::{ShardLabels, ShardMeasurement, ShardRecord};
pub use sampler::ShardSampler;
pub use size::{format_store_size, parse_store_size};
