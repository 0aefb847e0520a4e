//! Store configuration.

use serde::{Deserialize, Serialize};

/// What the store does with a module id missing from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownModulePolicy {
    /// Record it silently
    Accept,
    /// Record it and log a warning
    #[default]
    Warn,
    /// Refuse the update
    Reject,
}

/// Configuration for the progress store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Handling of ids outside the catalog
    pub unknown_module_policy: UnknownModulePolicy,
    /// Events buffered per subscriber before old ones are dropped
    pub event_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            unknown_module_policy: UnknownModulePolicy::default(),
            event_capacity: 64,
        }
    }
}

impl StoreConfig {
    /// Set the unknown module policy.
    pub fn with_unknown_module_policy(mut self, policy: UnknownModulePolicy) -> Self {
        self.unknown_module_policy = policy;
        self
    }

    /// Set the per-subscriber event buffer.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }
}
