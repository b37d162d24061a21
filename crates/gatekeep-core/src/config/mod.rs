//! Configuration system for gatekeep.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod coverage_config;
pub mod engine_config;
pub mod gate_config;
pub mod marker_config;
pub mod migration_config;
pub mod report_config;

pub use coverage_config::CoverageConfig;
pub use engine_config::EngineConfig;
pub use gate_config::{CliOverrides, GateConfig, PROJECT_CONFIG_FILE};
pub use marker_config::MarkerConfig;
pub use migration_config::{MigrationConfig, MigrationDetection};
pub use report_config::ReportConfig;
