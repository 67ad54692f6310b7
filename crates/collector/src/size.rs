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

//! Conversion of the cluster's human-readable store sizes into bytes.

use crate::error::{CollectorError, Result};

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// Recognised suffixes, in match order.
const UNITS: [(&str, f64); 3] = [("kb", KIB), ("mb", MIB), ("gb", GIB)];

/// Parse a store size such as `"512kb"` or `"3.2gb"` into bytes.
///
/// Surrounding whitespace is ignored and an empty string means zero.
/// Suffixes are case-sensitive. Plain bytes (`b`) and anything above
/// gigabytes are rejected as [`CollectorError::UnknownUnit`].
pub fn parse_store_size(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let (number, multiplier) = UNITS
        .iter()
        .find_map(|(suffix, multiplier)| trimmed.strip_suffix(suffix).map(|number| (number, *multiplier)))
        .ok_or_else(|| CollectorError::UnknownUnit(raw.to_string()))?;

    let value = number.parse::<f64>().map_err(|source| CollectorError::MalformedNumber {
        value: number.to_string(),
        source,
    })?;

    Ok(value * multiplier)
}

/// Render a byte count in the largest unit that keeps the value at or above one.
///
/// Values below one kilobyte are still rendered in `kb`.
pub fn format_store_size(bytes: f64) -> String {
    let (suffix, multiplier) = UNITS
        .iter()
        .rev()
        .find(|(_, multiplier)| bytes.abs() >= *multiplier)
        .copied()
        .unwrap_or(UNITS[0]);
    format!("{}{suffix}", bytes / multiplier)
}
