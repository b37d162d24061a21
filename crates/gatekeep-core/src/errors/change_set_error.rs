//! Change-set construction errors.

use super::error_code::{self, GatekeepErrorCode};

/// Errors raised while normalizing caller-supplied paths into a `ChangeSet`.
#[derive(Debug, thiserror::Error)]
pub enum ChangeSetError {
    #[error("Change-set path must be relative: {0}")]
    AbsolutePath(String),

    #[error("Change-set path escapes the project root: {0}")]
    ParentTraversal(String),

    #[error("Failed to read change-set list from {source_name}: {message}")]
    ListUnreadable { source_name: String, message: String },
}

impl GatekeepErrorCode for ChangeSetError {
    fn error_code(&self) -> &'static str {
        error_code::CHANGESET_ERROR
    }
}
