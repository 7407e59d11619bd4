use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ActivateError;

pub const DEFAULT_CYCLE_SECS: u64 = 120;

/// Monitoring session configuration. Validated synchronously at activation,
/// before any probe is attached or task spawned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Pattern matched against fully qualified class names.
    pub class_pattern: String,
    /// Pattern matched against method names.
    pub method_pattern: String,
    /// Reporting interval in whole seconds. Must be at least 1.
    #[serde(default = "default_cycle_secs")]
    pub cycle_secs: u64,
    /// Ask the engine to also instrument subtypes of matched classes.
    #[serde(default)]
    pub include_subtypes: bool,
    /// Treat the patterns as regular expressions instead of wildcards.
    #[serde(default)]
    pub regex: bool,
}

fn default_cycle_secs() -> u64 {
    DEFAULT_CYCLE_SECS
}

impl MonitorConfig {
    pub fn new(class_pattern: impl Into<String>, method_pattern: impl Into<String>) -> Self {
        Self {
            class_pattern: class_pattern.into(),
            method_pattern: method_pattern.into(),
            cycle_secs: DEFAULT_CYCLE_SECS,
            include_subtypes: false,
            regex: false,
        }
    }

    pub fn with_cycle_secs(mut self, cycle_secs: u64) -> Self {
        self.cycle_secs = cycle_secs;
        self
    }

    pub fn cycle(&self) -> Duration {
        Duration::from_secs(self.cycle_secs)
    }

    pub fn validate(&self) -> Result<(), ActivateError> {
        if self.cycle_secs == 0 {
            return Err(ActivateError::InvalidCycle {
                cycle_secs: self.cycle_secs,
            });
        }
        if self.class_pattern.trim().is_empty() {
            return Err(ActivateError::EmptyClassPattern);
        }
        if self.method_pattern.trim().is_empty() {
            return Err(ActivateError::EmptyMethodPattern);
        }
        Ok(())
    }
}
