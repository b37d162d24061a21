//! Error handling for gatekeep.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod change_set_error;
pub mod config_error;
pub mod coverage_error;
pub mod error_code;
pub mod rule_error;

pub use change_set_error::ChangeSetError;
pub use config_error::ConfigError;
pub use coverage_error::CoverageError;
pub use error_code::GatekeepErrorCode;
pub use rule_error::RuleError;
