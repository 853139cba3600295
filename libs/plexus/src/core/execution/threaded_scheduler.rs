// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! One worker thread per element.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};

use super::{RunningScheduler, SchedulerConfig};
use crate::core::elements::{ElementNode, ElementState};
use crate::core::error::Result;
use crate::core::handle::{Ref, WeakRef};
use crate::core::pipeline::Pipeline;

/// Spawns a polling worker for every element present at spawn time.
///
/// Elements only exchange data through their pins, so workers share nothing
/// else. A worker exits when shutdown is signalled, when its element leaves
/// the pipeline, or when the pipeline is dropped.
#[derive(Debug, Clone, Default)]
pub struct ThreadedScheduler {
    config: SchedulerConfig,
}

impl ThreadedScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn spawn(&self, pipeline: &Ref<Pipeline>) -> Result<RunningScheduler> {
        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(0);
        let idle = self.config.idle_interval();
        // Workers started so far are joined by the handle's Drop if a later
        // spawn fails.
        let mut running = RunningScheduler::new(pipeline.id().clone(), shutdown_tx, Vec::new());

        for element in pipeline.elements() {
            let pipeline_ref = Ref::downgrade(pipeline);
            let shutdown_rx = shutdown_rx.clone();
            let handle = std::thread::Builder::new()
                .name(format!("plexus-{}", element.name()))
                .spawn(move || run_element_loop(element, pipeline_ref, shutdown_rx, idle))?;
            running.push_worker(handle);
        }

        tracing::info!(
            "[{}] Threaded scheduler started with {} workers",
            pipeline.id(),
            running.worker_count()
        );
        Ok(running)
    }
}

fn run_element_loop(
    element: Ref<ElementNode>,
    pipeline: WeakRef<Pipeline>,
    shutdown_rx: Receiver<()>,
    idle: Duration,
) {
    tracing::debug!("[{}] Worker started for '{}'", element.id(), element.name());

    loop {
        if !matches!(shutdown_rx.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }

        let member = pipeline
            .upgrade()
            .is_some_and(|p| p.contains(element.id()));
        if !member {
            tracing::debug!("[{}] No longer in pipeline, worker exiting", element.id());
            break;
        }

        let wait = if element.evaluate_readiness() == ElementState::Ready {
            match element.process() {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("[{}] Process error in '{}': {}", element.id(), element.name(), e);
                    Some(idle)
                }
            }
        } else {
            Some(idle)
        };

        if let Some(wait) = wait {
            match shutdown_rx.recv_timeout(wait) {
                Err(RecvTimeoutError::Timeout) => {}
                _ => break,
            }
        }
    }

    tracing::debug!("[{}] Worker stopped", element.id());
}
