//! Coverage data types.

use serde::{Deserialize, Serialize};

/// Coverage observation extracted from the artifact. Read-only after parse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Fraction of executable lines exercised by tests, in [0, 1].
    pub line_rate: f64,
    /// False when the root element had no `line-rate` attribute and the rate
    /// defaulted to 0.0.
    pub attribute_present: bool,
}

impl CoverageSummary {
    /// True when the rate meets `threshold` (boundary inclusive).
    pub fn meets(&self, threshold: f64) -> bool {
        self.line_rate >= threshold
    }
}
