//! GatekeepErrorCode trait for tagged diagnostics.

/// Every error enum implements this to provide a stable, machine-greppable
/// code alongside its human message.
pub trait GatekeepErrorCode {
    /// Returns the error code string (e.g., "CONFIG_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the tagged error string: `[ERROR_CODE] message`.
    fn tagged(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CHANGESET_ERROR: &str = "CHANGESET_ERROR";
pub const COVERAGE_ERROR: &str = "COVERAGE_ERROR";
pub const RULE_ERROR: &str = "RULE_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
