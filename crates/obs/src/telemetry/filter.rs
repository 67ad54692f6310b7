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

//! Log filtering for the tracing subscriber.

use smallvec::SmallVec;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::Directive;

/// Build an `EnvFilter` from the given log level string.
///
/// `RUST_LOG` takes precedence over `logger_level` when set. For
/// non-verbose levels the transport crates used by the fetcher and the
/// OTLP exporter (`hyper`, `tonic`, `h2`, `reqwest`, `tower`) are silenced.
pub(super) fn build_env_filter(logger_level: &str) -> EnvFilter {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(logger_level));

    if !matches!(logger_level, "trace" | "debug") {
        let directives: SmallVec<[&str; 5]> = smallvec::smallvec!["hyper", "tonic", "h2", "reqwest", "tower"];
        for directive in directives {
            if let Ok(directive) = format!("{directive}=off").parse::<Directive>() {
                filter = filter.add_directive(directive);
            }
        }
    }

    filter
}
