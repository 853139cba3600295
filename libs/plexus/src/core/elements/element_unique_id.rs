// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an element instance.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementUniqueId(String);

impl ElementUniqueId {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementUniqueId {
    fn default() -> Self {
        Self(format!("E{}", cuid2::create_id()))
    }
}

impl fmt::Display for ElementUniqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prefix_and_uniqueness() {
        let ids: HashSet<ElementUniqueId> = (0..64).map(|_| ElementUniqueId::new()).collect();
        assert_eq!(ids.len(), 64);
        for id in &ids {
            assert!(id.as_str().starts_with('E'));
            assert!(id.as_str().len() > 1);
            assert_eq!(id.to_string(), id.as_str());
        }
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = ElementUniqueId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: ElementUniqueId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
