// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

pub mod elements;
pub mod error;
pub mod execution;
pub mod handle;
pub mod pins;
pub mod pipeline;
pub mod prelude;
pub mod registry;

pub use elements::*;
pub use error::*;
pub use execution::*;
pub use handle::*;
pub use pins::*;
pub use pipeline::*;
pub use registry::*;
