//! Gate engine configuration.

use serde::{Deserialize, Serialize};

/// Configuration for rule selection and scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Rule ids to run. Empty means every registered rule.
    #[serde(default)]
    pub enabled_rules: Vec<String>,
    /// Evaluate rules on the rayon pool. Default: false.
    pub parallel: Option<bool>,
}

impl EngineConfig {
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }
}
