// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlexusError {
    /// A name collided with one already registered, or an argument did not
    /// match what the callee expects (unknown pin, mismatched pin types).
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    /// The operation is not allowed in the current lifecycle state, e.g.
    /// touching pin data outside the scoped invocation window.
    #[error("Illegal access: {0}")]
    IllegalAccess(String),

    #[error("Pipeline error: {0}")]
    Pipeline(String),

    #[error("Element creation failed: {0}")]
    ElementCreation(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlexusError>;
