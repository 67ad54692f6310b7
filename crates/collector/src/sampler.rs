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

use crate::error::Result;
use crate::fetcher::ShardSource;
use crate::record::ShardMeasurement;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Turns one fetch of the monitored indices into gauge measurements.
///
/// A sample is all-or-nothing: any fetch or size parse failure fails the
/// whole sample and yields no measurements.
#[derive(Clone)]
pub struct ShardSampler {
    source: Arc<dyn ShardSource>,
    indices: Vec<String>,
}

impl ShardSampler {
    pub fn new(source: Arc<dyn ShardSource>, indices: Vec<String>) -> Self {
        Self { source, indices }
    }

    pub async fn sample(&self, cancel: &CancellationToken) -> Result<Vec<ShardMeasurement>> {
        let records = self.source.fetch_shard_info(cancel, &self.indices).await?;
        let measurements = records
            .iter()
            .map(ShardMeasurement::from_record)
            .collect::<Result<Vec<_>>>()?;
        debug!(indices = ?self.indices, measurements = measurements.len(), "Sampled shard store sizes");
        Ok(measurements)
    }
}
