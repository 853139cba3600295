// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Reference schedulers.
//!
//! Any driver works as long as it goes through `ElementNode::init`,
//! `evaluate_readiness`/`is_ready_for_processing` and `process`. The two
//! shipped here cover the single-threaded and thread-per-element cases.

mod cooperative_scheduler;
mod initialize;
mod running_scheduler;
mod scheduler_config;
mod threaded_scheduler;

pub use cooperative_scheduler::{CooperativeScheduler, PassReport};
pub use initialize::{initialize_pipeline, InitReport};
pub use running_scheduler::{start, RunningScheduler};
pub use scheduler_config::{InitFailurePolicy, SchedulerConfig, SchedulingStrategy};
pub use threaded_scheduler::ThreadedScheduler;
