//! Coverage artifact errors.

use super::error_code::{self, GatekeepErrorCode};

/// Errors that can occur while reading the coverage artifact.
///
/// Each variant is fatal to the coverage rule (it cannot default its way to a
/// pass) but never to the gate: the rule turns it into a failing finding.
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("coverage artifact not found: {path}")]
    NotFound { path: String },

    #[error("coverage artifact unreadable: {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("coverage artifact is not well-formed XML: {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("coverage artifact has no root element: {path}")]
    MissingRoot { path: String },

    #[error("line-rate attribute is not a decimal: {value:?}")]
    InvalidRate { value: String },

    #[error("line-rate {value} is outside [0, 1]")]
    RateOutOfRange { value: f64 },
}

impl GatekeepErrorCode for CoverageError {
    fn error_code(&self) -> &'static str {
        error_code::COVERAGE_ERROR
    }
}
