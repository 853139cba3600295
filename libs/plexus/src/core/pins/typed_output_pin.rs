// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::any::Any;

use crossbeam_channel::Sender;
use parking_lot::Mutex;

use super::{InputPin, OutputPin, Pin, PinDirection, TypedInputPin};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::Ref;

struct OutputWindow<T> {
    open: bool,
    staged: Vec<T>,
}

/// Output pin carrying values of type `T`.
///
/// Values written during an invocation are staged and delivered to every
/// connected input when the window closes, so downstream elements observe
/// them on their next readiness evaluation.
pub struct TypedOutputPin<T> {
    name: String,
    targets: Mutex<Vec<(String, Sender<T>)>>,
    window: Mutex<OutputWindow<T>>,
}

impl<T: Clone + Send + 'static> TypedOutputPin<T> {
    pub fn new(name: impl Into<String>) -> Ref<Self> {
        Ref::new(Self {
            name: name.into(),
            targets: Mutex::new(Vec::new()),
            window: Mutex::new(OutputWindow {
                open: false,
                staged: Vec::new(),
            }),
        })
    }

    /// Write a value. Only valid inside a `process()` invocation.
    pub fn put(&self, value: T) -> Result<()> {
        let mut window = self.window.lock();
        if !window.open {
            return Err(PlexusError::IllegalAccess(format!(
                "output pin '{}' written outside of a process() invocation",
                self.name
            )));
        }
        window.staged.push(value);
        Ok(())
    }

    /// Names of the input pins this output delivers to.
    pub fn target_names(&self) -> Vec<String> {
        self.targets
            .lock()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl<T: Clone + Send + 'static> Pin for TypedOutputPin<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn direction(&self) -> PinDirection {
        PinDirection::Output
    }

    fn data_type(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Clone + Send + 'static> OutputPin for TypedOutputPin<T> {
    fn connect(&self, input: &dyn InputPin) -> Result<()> {
        let Some(typed) = input.as_any().downcast_ref::<TypedInputPin<T>>() else {
            return Err(PlexusError::IllegalArgument(format!(
                "cannot connect output pin '{}' ({}) to input pin '{}' ({})",
                self.name,
                self.data_type(),
                input.name(),
                input.data_type()
            )));
        };

        self.targets
            .lock()
            .push((typed.name().to_string(), typed.sender()));
        typed.add_connection();

        tracing::debug!("[{}] Connected to input pin '{}'", self.name, typed.name());
        Ok(())
    }

    fn connection_count(&self) -> usize {
        self.targets.lock().len()
    }

    fn scope(&self) {
        let mut window = self.window.lock();
        window.open = true;
        window.staged.clear();
    }

    fn unscope(&self) {
        let staged = {
            let mut window = self.window.lock();
            window.open = false;
            std::mem::take(&mut window.staged)
        };
        if staged.is_empty() {
            return;
        }

        let targets = self.targets.lock();
        if targets.is_empty() {
            tracing::trace!(
                "[{}] Discarding {} value(s), output is unconnected",
                self.name,
                staged.len()
            );
            return;
        }

        for value in staged {
            for (target, sender) in targets.iter() {
                if sender.send(value.clone()).is_err() {
                    tracing::trace!("[{}] Input pin '{}' is gone", self.name, target);
                }
            }
        }
    }
}
