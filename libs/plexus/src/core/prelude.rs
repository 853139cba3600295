// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Common imports for element authors and pipeline builders.

pub use crate::core::elements::{Element, ElementNode, ElementState, ElementUniqueId};
pub use crate::core::error::{PlexusError, Result};
pub use crate::core::execution::{
    initialize_pipeline, start, CooperativeScheduler, InitFailurePolicy, InitReport, PassReport,
    RunningScheduler, SchedulerConfig, SchedulingStrategy, ThreadedScheduler,
};
pub use crate::core::handle::{Ref, WeakRef};
pub use crate::core::pins::{InputPin, OutputPin, Pin, PinRegistry, TypedInputPin, TypedOutputPin};
pub use crate::core::pipeline::Pipeline;
pub use crate::core::registry::{ElementTypeRegistry, ELEMENT_REGISTRY};
pub use crate::register_element;
