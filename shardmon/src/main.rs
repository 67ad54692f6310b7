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

mod config;
mod error;
mod shutdown;

use clap::Parser;
use config::Opt;
use error::Result;
use shardmon_collector::ShardCollector;
use shardmon_config::HTTP_TIMEOUT_SECS;
use shardmon_obs::init_logging;
use shutdown::ShutdownListener;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// How long the final export may keep fetching before its requests are cancelled.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(HTTP_TIMEOUT_SECS);

fn main() -> Result<()> {
    let opt = Opt::parse();
    run(opt)
}

#[tokio::main]
async fn run(opt: Opt) -> Result<()> {
    init_logging(&opt.logger_config())?;
    debug!("opt: {:?}", &opt);

    let config = opt.collector_config();
    let collector = ShardCollector::new(&config).inspect_err(|err| error!(error = %err, "Failed to create collector"))?;
    let listener = ShutdownListener::install()?;

    let shutdown = CancellationToken::new();
    let on_signal = shutdown.clone();
    tokio::spawn(async move {
        let signal = listener.wait().await;
        info!(?signal, "Stopping shard collection");
        on_signal.cancel();
    });

    info!(
        interval_secs = config.collect_interval.as_secs(),
        indices = ?config.indices,
        "Shard collection started"
    );
    // Fetches outlive the signal so the final export on shutdown still samples.
    let fetches = CancellationToken::new();
    collect_loop(&collector, config.collect_interval, &shutdown, &fetches).await;

    let grace = fetches.clone();
    tokio::spawn(async move {
        tokio::time::sleep(SHUTDOWN_GRACE).await;
        if !grace.is_cancelled() {
            warn!(grace_secs = SHUTDOWN_GRACE.as_secs(), "Final export still fetching, cancelling");
            grace.cancel();
        }
    });
    let stopped = tokio::task::block_in_place(|| collector.shutdown());
    fetches.cancel();
    stopped.inspect_err(|err| error!(error = %err, "Failed to shut down collector"))?;
    Ok(())
}

/// Refresh the gauge registration once per `period` until `shutdown` is
/// cancelled.
///
/// The first registration happens immediately. The meter provider fetches
/// and exports on its own schedule from then on; a failed registration is
/// logged and the loop keeps ticking.
async fn collect_loop(collector: &ShardCollector, period: Duration, shutdown: &CancellationToken, fetches: &CancellationToken) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = ticker.tick() => match collector.collect(fetches) {
                Ok(()) => debug!("Shard store size gauge registered"),
                Err(err) => error!(error = %err, "Failed to register shard store size gauge"),
            },
        }
    }
}
