// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::core::error::Result;

/// Direction of a pin relative to its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinDirection {
    /// Data enters the element.
    Input,
    /// Data leaves the element.
    Output,
}

impl std::fmt::Display for PinDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// A named attachment point on an element.
///
/// The core only relies on a pin's name and direction; buffering and
/// connection topology belong to the pin implementation.
pub trait Pin: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn direction(&self) -> PinDirection;

    /// Type name of the data carried by this pin.
    fn data_type(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;
}

/// Input side of the pin contract.
///
/// `scope`/`unscope` bracket exactly one `process()` invocation of the
/// owning element. Between them the pin exposes one unit of data; outside
/// them the data is not reachable.
pub trait InputPin: Pin {
    /// Whether unconsumed data is waiting. Must not mutate the pin.
    fn has_data(&self) -> bool;

    /// Required pins participate in the default readiness rule.
    fn is_required(&self) -> bool {
        true
    }

    fn connection_count(&self) -> usize;

    fn scope(&self);

    fn unscope(&self);
}

/// Output side of the pin contract.
pub trait OutputPin: Pin {
    /// Connect this output to `input`. Fails with `IllegalArgument` when the
    /// input does not accept this pin's data type.
    fn connect(&self, input: &dyn InputPin) -> Result<()>;

    fn connection_count(&self) -> usize;

    fn scope(&self);

    /// Close the invocation window and hand staged data downstream.
    fn unscope(&self);
}
