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

//! Sampling thread behind the gauge callback.
//!
//! Metric callbacks are synchronous and run on the meter provider's reader
//! thread, while fetching is async. Each callback hands a job to a
//! dedicated OS thread that owns a current-thread Tokio runtime and waits
//! for the result, so the callback works the same whatever runtime (if
//! any) the caller lives in.

use crate::error::{CollectorError, Result};
use crate::record::ShardMeasurement;
use crate::sampler::ShardSampler;
use std::sync::{Mutex, mpsc as std_mpsc};
use std::thread::{self, JoinHandle};
use tokio::runtime::Builder;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const WORKER_THREAD_NAME: &str = "shardmon-sampler";

/// Pending samples beyond the one in flight. Readers collect one at a time.
const JOB_QUEUE_CAPACITY: usize = 4;

struct SampleJob {
    cancel: CancellationToken,
    reply: std_mpsc::SyncSender<Result<Vec<ShardMeasurement>>>,
}

pub(crate) struct SampleWorker {
    jobs: mpsc::Sender<SampleJob>,
    stop: CancellationToken,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl SampleWorker {
    pub(crate) fn spawn(sampler: ShardSampler) -> Result<Self> {
        let (jobs, mut queue) = mpsc::channel::<SampleJob>(JOB_QUEUE_CAPACITY);
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<std::io::Result<()>>(1);
        let stop = CancellationToken::new();
        let stopped = stop.clone();

        let thread = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                runtime.block_on(async move {
                    loop {
                        let job = tokio::select! {
                            biased;
                            _ = stopped.cancelled() => break,
                            job = queue.recv() => match job {
                                Some(job) => job,
                                None => break,
                            },
                        };
                        let result = sampler.sample(&job.cancel).await;
                        // The callback may have given up waiting; nothing to do then.
                        let _ = job.reply.send(result);
                    }
                    debug!("Sampler worker stopped");
                });
            })
            .map_err(|e| CollectorError::Worker(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(CollectorError::Worker(e.to_string())),
            Err(_) => return Err(CollectorError::Worker("sampler worker exited during startup".to_string())),
        }

        Ok(Self {
            jobs,
            stop,
            thread: Mutex::new(Some(thread)),
        })
    }

    /// Run one sample on the worker thread and block until it finishes.
    ///
    /// Must not be called from inside the worker's own runtime.
    pub(crate) fn sample_blocking(&self, cancel: &CancellationToken) -> Result<Vec<ShardMeasurement>> {
        let (reply, result) = std_mpsc::sync_channel(1);
        self.jobs
            .try_send(SampleJob {
                cancel: cancel.clone(),
                reply,
            })
            .map_err(|e| CollectorError::Worker(e.to_string()))?;
        result
            .recv()
            .map_err(|_| CollectorError::Worker("sampler worker stopped before replying".to_string()))?
    }

    /// Stop the worker once its current job, if any, has finished.
    pub(crate) fn stop(&self) {
        self.stop.cancel();
        let handle = self.thread.lock().ok().and_then(|mut thread| thread.take());
        if let Some(handle) = handle {
            if handle.join().is_err() {
                warn!("Sampler worker panicked");
            }
        }
    }
}

impl Drop for SampleWorker {
    fn drop(&mut self) {
        self.stop.cancel();
    }
}
