// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Plexus: the execution core of a dataflow pipeline.
//!
//! Elements expose named input and output pins, move through a small
//! lifecycle (`Uninitialized` → `NotReady` ⇄ `Ready`) and are driven by a
//! scheduler that asks each one whether it is ready and, if so, runs it
//! inside a scoped pin-access window.
//!
//! ```rust,ignore
//! use plexus::prelude::*;
//!
//! let pipeline = Pipeline::new("demo");
//! let node = ELEMENT_REGISTRY.instantiate("counter", "counter-0")?;
//! pipeline.add(&node)?;
//!
//! let scheduler = CooperativeScheduler::new(SchedulerConfig::default());
//! initialize_pipeline(&pipeline, InitFailurePolicy::DisableElement)?;
//! scheduler.run_until_idle(&pipeline, 16)?;
//! ```

#![allow(clippy::type_complexity)] // Constructor and pin handle types are clear in context

// Re-export inventory for `register_element!`
pub use inventory;

pub mod core;

pub use self::core::{
    initialize_pipeline, ref_count, start, CooperativeScheduler, Element, ElementNode,
    ElementRegistration, ElementState, ElementTypeRegistry, ElementUniqueId, InitFailurePolicy,
    InitReport, InputPin, OutputPin, PassReport, Pin, PinDirection, PinRegistry, PinScope,
    Pipeline, PipelineUniqueId, PlexusError, Ref, Result, RunningScheduler, SchedulerConfig,
    SchedulingStrategy, ThreadedScheduler, TypedInputPin, TypedOutputPin, WeakRef,
    ELEMENT_REGISTRY,
};

pub use self::core::prelude;
