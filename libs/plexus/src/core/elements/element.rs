// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::ElementState;
use crate::core::error::Result;
use crate::core::pins::PinRegistry;

/// Capability interface implemented by every processing element.
///
/// An element keeps typed handles to its own pins and registers them with the
/// [`PinRegistry`] passed to [`init`](Element::init). Schedulers never call
/// these methods directly; they go through
/// [`ElementNode`](super::ElementNode), which owns the lifecycle state and
/// opens the pin scope around [`process`](Element::process).
///
/// ```rust,ignore
/// struct Doubler {
///     input: Ref<TypedInputPin<i64>>,
///     output: Ref<TypedOutputPin<i64>>,
/// }
///
/// impl Element for Doubler {
///     fn init(&mut self, pins: &mut PinRegistry) -> Result<ElementState> {
///         pins.add_input_pin(self.input.clone())?;
///         pins.add_output_pin(self.output.clone())?;
///         Ok(ElementState::NotReady)
///     }
///
///     fn process(&mut self) -> Result<()> {
///         if let Some(v) = self.input.take()? {
///             self.output.put(v * 2)?;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Element: Send + 'static {
    /// One-time setup: register pins, acquire resources.
    ///
    /// Returns the resulting state, `NotReady` or `Ready`.
    fn init(&mut self, pins: &mut PinRegistry) -> Result<ElementState>;

    /// Whether the element can run now. Must not mutate pins.
    ///
    /// The default requires unconsumed data on every required input.
    /// Override to run on partial input (event-style ports) or to gate on
    /// state accumulated from earlier invocations.
    fn is_ready_for_processing(&self, pins: &PinRegistry) -> bool {
        pins.all_required_inputs_have_data()
    }

    /// One unit of work. All input and output flows through pins.
    fn process(&mut self) -> Result<()>;

    /// Type name reported for diagnostics.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
