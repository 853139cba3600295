// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock, RwLockWriteGuard};
use serde_json::{json, Value as JsonValue};

use super::{Element, ElementState, ElementUniqueId};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::{Ref, WeakRef};
use crate::core::pins::{InputPin, OutputPin, PinRegistry, PinScope};
use crate::core::pipeline::{Pipeline, PipelineUniqueId};

/// Undoes a failed `init()`: drops pins registered during the call and marks
/// the node inert, unless committed. Also runs if `Element::init` panics.
struct InitRollback<'a> {
    pins: RwLockWriteGuard<'a, PinRegistry>,
    inputs_before: usize,
    outputs_before: usize,
    inert: &'a AtomicBool,
    committed: bool,
}

impl Drop for InitRollback<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.pins.truncate(self.inputs_before, self.outputs_before);
            self.inert.store(true, Ordering::Release);
        }
    }
}

#[derive(Default)]
struct PipelineLink {
    pipeline: WeakRef<Pipeline>,
    pipeline_id: Option<PipelineUniqueId>,
}

/// A managed element: the user [`Element`] plus its pins, lifecycle state and
/// pipeline back-reference.
///
/// Graphs and schedulers hold `Ref<ElementNode>`. The node owns the only
/// writer of [`ElementState`] after [`init`](Self::init), and serializes
/// invocations of the element through a per-element lock.
///
/// Lock order: element, then pins, then pipeline link, then the pipeline's
/// member table.
pub struct ElementNode {
    id: ElementUniqueId,
    name: String,
    type_name: String,
    element: Mutex<Box<dyn Element>>,
    pins: RwLock<PinRegistry>,
    state: RwLock<ElementState>,
    init_attempted: AtomicBool,
    inert: AtomicBool,
    invocations: AtomicU64,
    link: Mutex<PipelineLink>,
}

impl ElementNode {
    pub fn new<E: Element>(name: impl Into<String>, element: E) -> Ref<Self> {
        let type_name = element.type_name().to_string();
        Self::from_boxed(name, type_name, Box::new(element))
    }

    pub fn from_boxed(
        name: impl Into<String>,
        type_name: impl Into<String>,
        element: Box<dyn Element>,
    ) -> Ref<Self> {
        Ref::new(Self {
            id: ElementUniqueId::new(),
            name: name.into(),
            type_name: type_name.into(),
            element: Mutex::new(element),
            pins: RwLock::new(PinRegistry::new()),
            state: RwLock::new(ElementState::Uninitialized),
            init_attempted: AtomicBool::new(false),
            inert: AtomicBool::new(false),
            invocations: AtomicU64::new(0),
            link: Mutex::new(PipelineLink::default()),
        })
    }

    pub fn id(&self) -> &ElementUniqueId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn state(&self) -> ElementState {
        *self.state.read()
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Acquire)
    }

    /// True once `init()` has failed. An inert node is never ready and
    /// refuses `process()`.
    pub fn is_inert(&self) -> bool {
        self.inert.load(Ordering::Acquire)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Run the element's one-time setup.
    ///
    /// Only valid from `Uninitialized`, and only once. If the element fails,
    /// pins it registered during this call are removed again and the node
    /// becomes inert.
    pub fn init(&self) -> Result<ElementState> {
        let mut element = self.element.lock();

        if self.init_attempted.swap(true, Ordering::AcqRel) {
            return Err(PlexusError::IllegalAccess(format!(
                "init() called more than once on element '{}' ({})",
                self.name,
                self.state()
            )));
        }

        let pins = self.pins.write();
        let mut rollback = InitRollback {
            inputs_before: pins.input_count(),
            outputs_before: pins.output_count(),
            pins,
            inert: &self.inert,
            committed: false,
        };

        let outcome = match element.init(&mut rollback.pins) {
            Ok(ElementState::Uninitialized) => Err(PlexusError::Pipeline(format!(
                "element '{}' reported Uninitialized from init()",
                self.name
            ))),
            other => other,
        };

        let state = outcome?;
        rollback.committed = true;
        *self.state.write() = state;
        tracing::info!(
            "[{}] Initialized element '{}' ({}) -> {}",
            self.id,
            self.name,
            self.type_name,
            state
        );
        Ok(state)
    }

    /// Side-effect-free readiness query.
    ///
    /// Returns false while an invocation is in flight instead of waiting
    /// for it.
    pub fn is_ready_for_processing(&self) -> bool {
        self.poll_readiness().unwrap_or(false)
    }

    /// Re-evaluate readiness and record it as the node's state.
    ///
    /// Leaves the state untouched when the node is uninitialized, inert or
    /// currently busy.
    pub fn evaluate_readiness(&self) -> ElementState {
        match self.poll_readiness() {
            Some(ready) => {
                let next = ElementState::from_readiness(ready);
                let mut state = self.state.write();
                if *state != next {
                    tracing::trace!("[{}] {} -> {}", self.id, *state, next);
                    *state = next;
                }
                next
            }
            None => self.state(),
        }
    }

    fn poll_readiness(&self) -> Option<bool> {
        if self.is_inert() || !self.state().is_initialized() {
            return None;
        }
        let element = self.element.try_lock()?;
        let pins = self.pins.read();
        Some(element.is_ready_for_processing(&pins))
    }

    /// Invoke the element once inside a pin scope.
    ///
    /// Blocks while another invocation of the same element is running. The
    /// scope is closed on every exit path, including unwinding.
    pub fn process(&self) -> Result<()> {
        if self.is_inert() {
            return Err(PlexusError::IllegalAccess(format!(
                "process() on inert element '{}'",
                self.name
            )));
        }
        if !self.state().is_initialized() {
            return Err(PlexusError::IllegalAccess(format!(
                "process() on uninitialized element '{}'",
                self.name
            )));
        }

        let mut element = self.element.lock();
        let pins = self.pins.read();
        let invocation = self.invocations.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::trace!("[{}] process #{}", self.id, invocation);

        let _scope = PinScope::enter(&pins);
        element.process()
    }

    // =========================================================================
    // Pins
    // =========================================================================

    pub fn add_input_pin(&self, pin: Ref<dyn InputPin>) -> Result<()> {
        self.pins.write().add_input_pin(pin)
    }

    pub fn add_output_pin(&self, pin: Ref<dyn OutputPin>) -> Result<()> {
        self.pins.write().add_output_pin(pin)
    }

    pub fn input_pin(&self, name: &str) -> Option<Ref<dyn InputPin>> {
        self.pins.read().input_pin(name)
    }

    pub fn output_pin(&self, name: &str) -> Option<Ref<dyn OutputPin>> {
        self.pins.read().output_pin(name)
    }

    pub fn input_pin_names(&self) -> Vec<String> {
        self.pins.read().input_pin_names()
    }

    pub fn output_pin_names(&self) -> Vec<String> {
        self.pins.read().output_pin_names()
    }

    // =========================================================================
    // Pipeline membership
    // =========================================================================

    /// Pipeline this element belongs to, if it is still alive.
    pub fn pipeline(&self) -> Option<Ref<Pipeline>> {
        self.link.lock().pipeline.upgrade()
    }

    /// Id of the pipeline last recorded for this element.
    pub fn pipeline_id(&self) -> Option<PipelineUniqueId> {
        self.link.lock().pipeline_id.clone()
    }

    /// Move this element into `pipeline`, leaving its previous one.
    pub(crate) fn set_pipeline(self: &Ref<Self>, pipeline: &Ref<Pipeline>) -> Result<()> {
        let _element = self.element.lock();
        let mut link = self.link.lock();

        if link.pipeline_id.as_ref() == Some(pipeline.id()) && link.pipeline.upgrade().is_some() {
            return Err(PlexusError::IllegalArgument(format!(
                "element '{}' is already a member of pipeline '{}'",
                self.name,
                pipeline.name()
            )));
        }

        if let Some(previous) = link.pipeline.upgrade() {
            previous.detach_member(&self.id);
            tracing::debug!(
                "[{}] Left pipeline '{}' ({})",
                self.id,
                previous.name(),
                previous.id()
            );
        }

        pipeline.attach_member(Ref::clone(self));
        link.pipeline = Ref::downgrade(pipeline);
        link.pipeline_id = Some(pipeline.id().clone());
        tracing::debug!(
            "[{}] Joined pipeline '{}' ({})",
            self.id,
            pipeline.name(),
            pipeline.id()
        );
        Ok(())
    }

    /// Clear the back-reference if it still points at `pipeline_id`.
    pub(crate) fn clear_pipeline(&self, pipeline_id: &PipelineUniqueId) {
        let _element = self.element.lock();
        let mut link = self.link.lock();
        if link.pipeline_id.as_ref() == Some(pipeline_id) {
            *link = PipelineLink::default();
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let pins = self.pins.read();
        json!({
            "id": self.id.as_str(),
            "name": self.name,
            "type": self.type_name,
            "state": self.state(),
            "inert": self.is_inert(),
            "invocations": self.invocation_count(),
            "pipeline": self.pipeline_id().map(|id| id.to_string()),
            "inputs": pins.input_pin_names(),
            "outputs": pins.output_pin_names(),
        })
    }
}

impl std::fmt::Debug for ElementNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementNode")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("type_name", &self.type_name)
            .field("state", &self.state())
            .field("inert", &self.is_inert())
            .finish()
    }
}
