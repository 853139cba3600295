// Copyright (c) 2025 Jonathan Fontanez
// SPDX-License-Identifier: BUSL-1.1

//! Scheduler configuration, loadable from YAML.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{PlexusError, Result};

/// How elements are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingStrategy {
    /// One thread polls every element in insertion order.
    #[default]
    Cooperative,
    /// One thread per element.
    Threaded,
}

/// What to do when an element's `init()` fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitFailurePolicy {
    /// Leave the element inert and carry on with the rest.
    #[default]
    DisableElement,
    /// Fail the whole pipeline.
    AbortPipeline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub strategy: SchedulingStrategy,
    /// Sleep between polls when nothing was ready. 0 means 100µs.
    pub idle_interval_ms: u64,
    pub init_failure_policy: InitFailurePolicy,
    /// Cooperative passes per wake-up.
    pub max_passes_per_tick: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            strategy: SchedulingStrategy::default(),
            idle_interval_ms: 1,
            init_failure_policy: InitFailurePolicy::default(),
            max_passes_per_tick: 1,
        }
    }
}

impl SchedulerConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| PlexusError::Configuration(format!("Failed to parse config: {}", e)))
    }

    /// Load from a YAML file. Fails if the file is missing or invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PlexusError::Configuration(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| {
            PlexusError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        tracing::info!("Loaded scheduler config from {}", path.display());
        Ok(config)
    }

    /// Load from a YAML file, returning defaults if it is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!("No scheduler config at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}, using defaults", e);
                Self::default()
            }
        }
    }

    pub fn idle_interval(&self) -> Duration {
        if self.idle_interval_ms > 0 {
            Duration::from_millis(self.idle_interval_ms)
        } else {
            Duration::from_micros(100)
        }
    }
}
