// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::{InputPin, OutputPin};
use crate::core::error::{PlexusError, Result};
use crate::core::handle::Ref;

/// Name-indexed input and output pins of one element.
///
/// Names are unique per side; an input and an output may share a name.
/// Pins are kept in registration order, which is also the order reported by
/// the name enumerations.
#[derive(Default)]
pub struct PinRegistry {
    inputs: Vec<Ref<dyn InputPin>>,
    outputs: Vec<Ref<dyn OutputPin>>,
}

impl PinRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an input pin under its own name.
    pub fn add_input_pin(&mut self, pin: Ref<dyn InputPin>) -> Result<()> {
        if self.input_pin(pin.name()).is_some() {
            return Err(PlexusError::IllegalArgument(format!(
                "input pin '{}' already exists",
                pin.name()
            )));
        }
        self.inputs.push(pin);
        Ok(())
    }

    /// Register an output pin under its own name.
    pub fn add_output_pin(&mut self, pin: Ref<dyn OutputPin>) -> Result<()> {
        if self.output_pin(pin.name()).is_some() {
            return Err(PlexusError::IllegalArgument(format!(
                "output pin '{}' already exists",
                pin.name()
            )));
        }
        self.outputs.push(pin);
        Ok(())
    }

    pub fn input_pin(&self, name: &str) -> Option<Ref<dyn InputPin>> {
        self.inputs.iter().find(|p| p.name() == name).cloned()
    }

    pub fn output_pin(&self, name: &str) -> Option<Ref<dyn OutputPin>> {
        self.outputs.iter().find(|p| p.name() == name).cloned()
    }

    pub fn input_pin_names(&self) -> Vec<String> {
        self.inputs.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn output_pin_names(&self) -> Vec<String> {
        self.outputs.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Ref<dyn InputPin>> {
        self.inputs.iter()
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Ref<dyn OutputPin>> {
        self.outputs.iter()
    }

    /// Default readiness rule: every required input holds unconsumed data.
    ///
    /// Vacuously true when the element has no required inputs.
    pub fn all_required_inputs_have_data(&self) -> bool {
        self.inputs
            .iter()
            .filter(|p| p.is_required())
            .all(|p| p.has_data())
    }

    pub fn any_input_has_data(&self) -> bool {
        self.inputs.iter().any(|p| p.has_data())
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Drop pins registered after the given counts.
    pub(crate) fn truncate(&mut self, inputs: usize, outputs: usize) {
        self.inputs.truncate(inputs);
        self.outputs.truncate(outputs);
    }
}

impl std::fmt::Debug for PinRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinRegistry")
            .field("inputs", &self.input_pin_names())
            .field("outputs", &self.output_pin_names())
            .finish()
    }
}
