// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::thread::JoinHandle;

use crossbeam_channel::Sender;

use super::{
    initialize_pipeline, CooperativeScheduler, SchedulerConfig, SchedulingStrategy,
    ThreadedScheduler,
};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::Ref;
use crate::core::pipeline::{Pipeline, PipelineUniqueId};

/// Initialize `pipeline` and drive it on background threads with the
/// configured strategy.
pub fn start(pipeline: &Ref<Pipeline>, config: &SchedulerConfig) -> Result<RunningScheduler> {
    initialize_pipeline(pipeline, config.init_failure_policy)?;

    match config.strategy {
        SchedulingStrategy::Cooperative => CooperativeScheduler::new(config.clone()).spawn(pipeline),
        SchedulingStrategy::Threaded => ThreadedScheduler::new(config.clone()).spawn(pipeline),
    }
}

/// Handle to scheduler threads. Stops them when dropped.
pub struct RunningScheduler {
    pipeline_id: PipelineUniqueId,
    shutdown_tx: Option<Sender<()>>,
    workers: Vec<JoinHandle<()>>,
}

impl RunningScheduler {
    pub(crate) fn new(
        pipeline_id: PipelineUniqueId,
        shutdown_tx: Sender<()>,
        workers: Vec<JoinHandle<()>>,
    ) -> Self {
        Self {
            pipeline_id,
            shutdown_tx: Some(shutdown_tx),
            workers,
        }
    }

    pub(crate) fn push_worker(&mut self, worker: JoinHandle<()>) {
        self.workers.push(worker);
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    /// Signal shutdown and join every worker. In-flight invocations finish
    /// before this returns.
    pub fn stop(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        // Dropping the sender disconnects every worker's receiver.
        let Some(shutdown_tx) = self.shutdown_tx.take() else {
            return Ok(());
        };
        drop(shutdown_tx);

        let mut panicked = 0;
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                panicked += 1;
            }
        }

        tracing::info!("[{}] Scheduler stopped", self.pipeline_id);
        if panicked > 0 {
            return Err(PlexusError::Pipeline(format!(
                "{} scheduler worker(s) of pipeline '{}' panicked",
                panicked, self.pipeline_id
            )));
        }
        Ok(())
    }
}

impl Drop for RunningScheduler {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            tracing::warn!("{}", e);
        }
    }
}

impl std::fmt::Debug for RunningScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunningScheduler")
            .field("pipeline_id", &self.pipeline_id)
            .field("workers", &self.workers.len())
            .field("running", &self.shutdown_tx.is_some())
            .finish()
    }
}
