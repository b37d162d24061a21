//! Coverage threshold configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the coverage threshold rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct CoverageConfig {
    /// Minimum accepted line-rate in [0, 1]. Default: 0.80.
    pub threshold: Option<f64>,
    /// Coverage XML location, relative to the project root. Default: `cov/coverage.xml`.
    pub report_path: Option<String>,
}

impl CoverageConfig {
    /// Returns the effective threshold, defaulting to 0.80.
    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(0.80)
    }

    /// Returns the effective report path, defaulting to `cov/coverage.xml`.
    pub fn effective_report_path(&self) -> &str {
        self.report_path.as_deref().unwrap_or("cov/coverage.xml")
    }
}
