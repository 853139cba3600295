// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use super::InitFailurePolicy;
use crate::core::elements::{ElementState, ElementUniqueId};
use crate::core::error::{PlexusError, Result};
use crate::core::pipeline::Pipeline;

/// Outcome of [`initialize_pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    pub initialized: Vec<ElementUniqueId>,
    /// Elements whose `init()` failed and were left inert.
    pub disabled: Vec<ElementUniqueId>,
}

/// Initialize every uninitialized member of `pipeline`, in insertion order.
///
/// Members that are already initialized or inert are skipped.
pub fn initialize_pipeline(pipeline: &Pipeline, policy: InitFailurePolicy) -> Result<InitReport> {
    let mut report = InitReport::default();

    for element in pipeline.elements() {
        if element.is_inert() || element.state() != ElementState::Uninitialized {
            continue;
        }

        match element.init() {
            Ok(_) => report.initialized.push(element.id().clone()),
            Err(e) => match policy {
                InitFailurePolicy::DisableElement => {
                    tracing::warn!(
                        "[{}] Element '{}' failed to initialize, disabled: {}",
                        element.id(),
                        element.name(),
                        e
                    );
                    report.disabled.push(element.id().clone());
                }
                InitFailurePolicy::AbortPipeline => {
                    return Err(PlexusError::Pipeline(format!(
                        "element '{}' in pipeline '{}' failed to initialize: {}",
                        element.name(),
                        pipeline.name(),
                        e
                    )));
                }
            },
        }
    }

    tracing::info!(
        "[{}] Initialized {} elements ({} disabled)",
        pipeline.id(),
        report.initialized.len(),
        report.disabled.len()
    );
    Ok(report)
}
