// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use crossbeam_channel::{Receiver, RecvTimeoutError};

use super::{RunningScheduler, SchedulerConfig};
use crate::core::elements::ElementState;
use crate::core::error::Result;
use crate::core::handle::Ref;
use crate::core::pipeline::Pipeline;

/// Counters for one or more scheduling passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Invocations that returned `Ok`.
    pub processed: usize,
    /// Invocations that returned `Err`.
    pub failed: usize,
}

impl PassReport {
    pub fn invocations(&self) -> usize {
        self.processed + self.failed
    }
}

impl std::ops::AddAssign for PassReport {
    fn add_assign(&mut self, other: Self) {
        self.processed += other.processed;
        self.failed += other.failed;
    }
}

/// Single-threaded polling scheduler.
///
/// Each pass walks the pipeline in insertion order, re-evaluates readiness
/// and invokes every element that is ready.
#[derive(Debug, Clone, Default)]
pub struct CooperativeScheduler {
    config: SchedulerConfig,
}

impl CooperativeScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Run one pass. Process errors are logged and counted.
    pub fn run_pass(&self, pipeline: &Pipeline) -> Result<PassReport> {
        let mut report = PassReport::default();

        for element in pipeline.elements() {
            if element.evaluate_readiness() != ElementState::Ready {
                continue;
            }

            match element.process() {
                Ok(()) => report.processed += 1,
                Err(e) => {
                    tracing::warn!("[{}] Process error in '{}': {}", element.id(), element.name(), e);
                    report.failed += 1;
                }
            }
            element.evaluate_readiness();
        }

        Ok(report)
    }

    /// Run passes until one invokes nothing, or `max_passes` is reached.
    pub fn run_until_idle(&self, pipeline: &Pipeline, max_passes: usize) -> Result<PassReport> {
        let mut total = PassReport::default();
        for _ in 0..max_passes {
            let pass = self.run_pass(pipeline)?;
            if pass.invocations() == 0 {
                break;
            }
            total += pass;
        }
        Ok(total)
    }

    /// Drive `pipeline` on a background thread until stopped.
    pub fn spawn(&self, pipeline: &Ref<Pipeline>) -> Result<RunningScheduler> {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let scheduler = self.clone();
        let pipeline_ref = Ref::downgrade(pipeline);

        let handle = std::thread::Builder::new()
            .name(format!("plexus-coop-{}", pipeline.name()))
            .spawn(move || {
                let Some(pipeline) = pipeline_ref.upgrade() else {
                    return;
                };
                scheduler.run_loop(&pipeline, &shutdown_rx);
            })?;

        tracing::info!("[{}] Cooperative scheduler started", pipeline.id());
        Ok(RunningScheduler::new(
            pipeline.id().clone(),
            shutdown_tx,
            vec![handle],
        ))
    }

    fn run_loop(&self, pipeline: &Pipeline, shutdown_rx: &Receiver<()>) {
        let passes = self.config.max_passes_per_tick.max(1) as usize;
        loop {
            let mut tick = PassReport::default();
            for _ in 0..passes {
                match self.run_pass(pipeline) {
                    Ok(pass) => tick += pass,
                    Err(e) => tracing::warn!("[{}] Pass failed: {}", pipeline.id(), e),
                }
            }

            let wait = if tick.invocations() == 0 {
                self.config.idle_interval()
            } else {
                std::time::Duration::ZERO
            };
            match shutdown_rx.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => {}
                _ => break,
            }
        }
        tracing::debug!("[{}] Cooperative loop exited", pipeline.id());
    }
}
