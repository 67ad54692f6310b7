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

use std::io;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShutdownSignal {
    CtrlC,
    #[cfg(unix)]
    Sigterm,
}

/// Process termination listener. Installed before the collect loop starts
/// so that a failure to register handlers is fatal instead of silent.
pub(crate) struct ShutdownListener {
    #[cfg(unix)]
    sigterm: tokio::signal::unix::Signal,
}

impl ShutdownListener {
    pub(crate) fn install() -> io::Result<Self> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            Ok(Self {
                sigterm: signal(SignalKind::terminate())?,
            })
        }
        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    #[cfg(unix)]
    pub(crate) async fn wait(mut self) -> ShutdownSignal {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C signal");
                ShutdownSignal::CtrlC
            }
            _ = self.sigterm.recv() => {
                info!("Received SIGTERM signal");
                ShutdownSignal::Sigterm
            }
        }
    }

    #[cfg(not(unix))]
    pub(crate) async fn wait(self) -> ShutdownSignal {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received Ctrl-C signal");
        ShutdownSignal::CtrlC
    }
}
