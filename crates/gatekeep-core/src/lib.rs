//! gatekeep-core: change-set type, layered configuration, error enums, and
//! tracing setup shared by the analysis engine and the CLI.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::GateConfig;
pub use types::change_set::ChangeSet;
