// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

#[allow(clippy::module_inception)]
mod pipeline;
mod pipeline_unique_id;

pub use pipeline::Pipeline;
pub use pipeline_unique_id::PipelineUniqueId;
