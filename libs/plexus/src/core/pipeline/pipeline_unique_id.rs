// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineUniqueId(String);

impl PipelineUniqueId {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PipelineUniqueId {
    fn default() -> Self {
        Self(format!("G{}", cuid2::create_id()))
    }
}

impl fmt::Display for PipelineUniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_uniqueness() {
        let a = PipelineUniqueId::new();
        let b = PipelineUniqueId::new();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with('G'));
        assert!(b.to_string().starts_with('G'));
    }
}
