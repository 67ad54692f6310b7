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

//! Shared constants for the shardmon workspace.
//!
//! Everything here is a plain `const` so that the collector library, the
//! observability crate and the driver binary agree on names, defaults and
//! environment variables without depending on each other.

mod constants;

pub use constants::app::*;
pub use constants::collector::*;
pub use constants::env::*;
