//! CLI error type: everything that stops the gate before a verdict exists.

use gatekeep_core::errors::error_code::{self, GatekeepErrorCode};
use gatekeep_core::errors::{ChangeSetError, ConfigError, RuleError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ChangeSet(#[from] ChangeSetError),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("Unknown report format: {0}")]
    UnknownFormat(String),

    #[error("Report rendering failed: {0}")]
    Render(String),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl GatekeepErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::ChangeSet(e) => e.error_code(),
            Self::Rule(e) => e.error_code(),
            Self::UnknownFormat(_) | Self::Render(_) | Self::Output(_) => {
                error_code::REPORT_ERROR
            }
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
