// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{Receiver, Sender};
use parking_lot::Mutex;

use super::{InputPin, Pin, PinDirection};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::Ref;

/// Per-invocation view of the pin.
struct InputWindow<T> {
    open: bool,
    current: Option<T>,
}

/// Queue-backed input pin carrying values of type `T`.
///
/// Upstream outputs (or [`push`](Self::push)) append to a FIFO. Opening the
/// invocation window moves exactly one queued value into the window, where
/// the element reads it with [`take`](Self::take). Closing the window drops
/// anything the element left behind, so each invocation consumes at most
/// one value.
pub struct TypedInputPin<T> {
    name: String,
    required: bool,
    sender: Sender<T>,
    receiver: Receiver<T>,
    connections: AtomicUsize,
    window: Mutex<InputWindow<T>>,
}

impl<T: Send + 'static> TypedInputPin<T> {
    /// Create a required input pin.
    pub fn new(name: impl Into<String>) -> Ref<Self> {
        Ref::new(Self::build(name.into(), true))
    }

    /// Create an optional input pin. Optional pins are ignored by the
    /// default readiness rule.
    pub fn optional(name: impl Into<String>) -> Ref<Self> {
        Ref::new(Self::build(name.into(), false))
    }

    fn build(name: String, required: bool) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            name,
            required,
            sender,
            receiver,
            connections: AtomicUsize::new(0),
            window: Mutex::new(InputWindow {
                open: false,
                current: None,
            }),
        }
    }

    /// Feed a value from outside the graph.
    pub fn push(&self, value: T) {
        // The pin owns the receiver, so the queue cannot be disconnected.
        let _ = self.sender.send(value);
    }

    /// Number of values waiting in the queue.
    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    /// Take the value delivered for this invocation.
    ///
    /// Returns `Ok(None)` when the pin had no data when the window opened
    /// (possible for elements that run on partial input).
    pub fn take(&self) -> Result<Option<T>> {
        let mut window = self.window.lock();
        if !window.open {
            return Err(self.outside_window());
        }
        Ok(window.current.take())
    }

    /// Whether a value is available in the current window.
    pub fn has_current(&self) -> Result<bool> {
        let window = self.window.lock();
        if !window.open {
            return Err(self.outside_window());
        }
        Ok(window.current.is_some())
    }

    pub(super) fn sender(&self) -> Sender<T> {
        self.sender.clone()
    }

    pub(super) fn add_connection(&self) {
        self.connections.fetch_add(1, Ordering::AcqRel);
    }

    fn outside_window(&self) -> PlexusError {
        PlexusError::IllegalAccess(format!(
            "input pin '{}' accessed outside of a process() invocation",
            self.name
        ))
    }
}

impl<T: Send + 'static> Pin for TypedInputPin<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn direction(&self) -> PinDirection {
        PinDirection::Input
    }

    fn data_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Send + 'static> InputPin for TypedInputPin<T> {
    fn has_data(&self) -> bool {
        !self.receiver.is_empty()
    }

    fn is_required(&self) -> bool {
        self.required
    }

    fn connection_count(&self) -> usize {
        self.connections.load(Ordering::Acquire)
    }

    fn scope(&self) {
        let mut window = self.window.lock();
        window.open = true;
        window.current = self.receiver.try_recv().ok();
    }

    fn unscope(&self) {
        let mut window = self.window.lock();
        window.open = false;
        if window.current.take().is_some() {
            tracing::trace!("[{}] Dropping value left unread by process()", self.name);
        }
    }
}
