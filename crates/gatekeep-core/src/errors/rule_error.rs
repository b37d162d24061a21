//! Rule evaluation errors.

use super::error_code::{self, GatekeepErrorCode};

/// Errors that can occur while registering or evaluating gate rules.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Rule evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Rule {rule_id} panicked: {message}")]
    Panicked { rule_id: String, message: String },

    #[error("Rule {0} is already registered")]
    DuplicateRule(String),

    #[error("Unknown rule: {0}")]
    UnknownRule(String),
}

impl GatekeepErrorCode for RuleError {
    fn error_code(&self) -> &'static str {
        error_code::RULE_ERROR
    }
}
