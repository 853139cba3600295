// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::PinRegistry;

/// Guard that holds every pin of an element open for one invocation.
///
/// Creating the guard calls `scope()` on all inputs, then all outputs.
/// Dropping it calls `unscope()` in the same order, whether the invocation
/// returned, failed or unwound.
pub struct PinScope<'a> {
    pins: &'a PinRegistry,
}

impl<'a> PinScope<'a> {
    pub fn enter(pins: &'a PinRegistry) -> Self {
        for pin in pins.inputs() {
            pin.scope();
        }
        for pin in pins.outputs() {
            pin.scope();
        }
        Self { pins }
    }
}

impl Drop for PinScope<'_> {
    fn drop(&mut self) {
        for pin in self.pins.inputs() {
            pin.unscope();
        }
        for pin in self.pins.outputs() {
            pin.unscope();
        }
    }
}
