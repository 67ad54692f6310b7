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

//! Shard catalog rows and the measurements derived from them.

use crate::error::Result;
use crate::size::parse_store_size;
use opentelemetry::KeyValue;
use serde::{Deserialize, Deserializer, Serialize};
use shardmon_config::{LABEL_INDEX, LABEL_IP, LABEL_NODE, LABEL_PRIREP, LABEL_SHARD, LABEL_STATE};

/// One row of `_cat/shards?format=json`.
///
/// Every field is kept as the string the cluster sends. A missing key or a
/// JSON `null` decodes to an empty string; any other non-string value is a
/// decode error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardRecord {
    #[serde(rename = "index", deserialize_with = "nullable_string")]
    pub index_name: String,
    #[serde(rename = "shard", deserialize_with = "nullable_string")]
    pub shard_id: String,
    /// `p` for primary, `r` for replica.
    #[serde(rename = "prirep", deserialize_with = "nullable_string")]
    pub role: String,
    #[serde(deserialize_with = "nullable_string")]
    pub state: String,
    #[serde(rename = "docs", deserialize_with = "nullable_string")]
    pub document_count: String,
    #[serde(rename = "store", deserialize_with = "nullable_string")]
    pub store_size: String,
    #[serde(rename = "ip", deserialize_with = "nullable_string")]
    pub node_ip: String,
    #[serde(rename = "node", deserialize_with = "nullable_string")]
    pub node_name: String,
}

fn nullable_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Label set attached to every gauge observation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShardLabels {
    pub index: String,
    pub shard: String,
    pub prirep: String,
    pub state: String,
    pub node: String,
    pub ip: String,
}

impl ShardLabels {
    pub fn to_attributes(&self) -> [KeyValue; 6] {
        [
            KeyValue::new(LABEL_INDEX, self.index.clone()),
            KeyValue::new(LABEL_SHARD, self.shard.clone()),
            KeyValue::new(LABEL_PRIREP, self.prirep.clone()),
            KeyValue::new(LABEL_STATE, self.state.clone()),
            KeyValue::new(LABEL_NODE, self.node.clone()),
            KeyValue::new(LABEL_IP, self.ip.clone()),
        ]
    }
}

impl From<&ShardRecord> for ShardLabels {
    fn from(record: &ShardRecord) -> Self {
        Self {
            index: record.index_name.clone(),
            shard: record.shard_id.clone(),
            prirep: record.role.clone(),
            state: record.state.clone(),
            node: record.node_name.clone(),
            ip: record.node_ip.clone(),
        }
    }
}

/// Store size of one shard copy, in bytes, with its labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ShardMeasurement {
    pub bytes: f64,
    pub labels: ShardLabels,
}

impl ShardMeasurement {
    /// Parse the record's store size.
    pub fn from_record(record: &ShardRecord) -> Result<Self> {
        Ok(Self {
            bytes: parse_store_size(&record.store_size)?,
            labels: ShardLabels::from(record),
        })
    }
}
