// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Pins: the named attachment points of an element.
//!
//! [`Pin`], [`InputPin`] and [`OutputPin`] are the contract the core relies
//! on. [`TypedInputPin`] and [`TypedOutputPin`] are the queue-backed
//! implementation shipped with the crate.

mod pin;
mod pin_registry;
mod pin_scope;
mod typed_input_pin;
mod typed_output_pin;

pub use pin::{InputPin, OutputPin, Pin, PinDirection};
pub use pin_registry::PinRegistry;
pub use pin_scope::PinScope;
pub use typed_input_pin::TypedInputPin;
pub use typed_output_pin::TypedOutputPin;
