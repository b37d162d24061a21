//! Verdict to process exit code mapping.
//!
//! - **0**: every rule passed
//! - **1**: at least one rule failed
//! - **2**: the gate could not run (configuration, change set, internal error)

use super::types::GateVerdict;

/// Exit code constants.
pub mod codes {
    /// All rules passed.
    pub const PASSED: u8 = 0;

    /// At least one rule produced a `fail` finding.
    pub const FAILED: u8 = 1;

    /// The gate could not execute; no verdict was produced.
    pub const INFRASTRUCTURE: u8 = 2;
}

/// Exit code for a produced verdict. Never `INFRASTRUCTURE`: a verdict means
/// the gate ran.
pub fn exit_code_for(verdict: &GateVerdict) -> u8 {
    if verdict.passed {
        codes::PASSED
    } else {
        codes::FAILED
    }
}
