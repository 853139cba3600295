// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};

/// Lifecycle state of an element.
///
/// ```text
/// Uninitialized ──init()──▶ NotReady ◀──readiness──▶ Ready
///                  └──────────────────────────────▶ Ready
/// ```
///
/// There is no terminal state; dropping the last handle ends the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ElementState {
    /// Constructed, `init()` not yet run. Pins are not guaranteed usable.
    #[default]
    Uninitialized,
    /// Initialized, currently unable to produce output.
    NotReady,
    /// Initialized and able to produce output on demand.
    Ready,
}

impl ElementState {
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Self::Uninitialized)
    }

    pub(crate) fn from_readiness(ready: bool) -> Self {
        if ready {
            Self::Ready
        } else {
            Self::NotReady
        }
    }
}

impl std::fmt::Display for ElementState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "Uninitialized"),
            Self::NotReady => write!(f, "NotReady"),
            Self::Ready => write!(f, "Ready"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uninitialized() {
        assert_eq!(ElementState::default(), ElementState::Uninitialized);
        assert!(!ElementState::Uninitialized.is_initialized());
        assert!(ElementState::NotReady.is_initialized());
        assert!(ElementState::Ready.is_initialized());
    }

    #[test]
    fn test_serde_uses_variant_names() {
        let json = serde_json::to_string(&ElementState::NotReady).unwrap();
        assert_eq!(json, "\"NotReady\"");
        let state: ElementState = serde_json::from_str("\"Ready\"").unwrap();
        assert_eq!(state, ElementState::Ready);
    }
}
