//! Gate rules: the `GateRule` capability and the built-in checks.

pub mod coverage_threshold;
pub mod marker;
pub mod migration_consistency;
pub mod types;

pub use coverage_threshold::CoverageThresholdRule;
pub use marker::MarkerRule;
pub use migration_consistency::MigrationConsistencyRule;
pub use types::{GateInput, GateRule};

/// The built-in rules in their default report order.
pub fn default_rules() -> Vec<Box<dyn GateRule>> {
    vec![
        Box::new(MarkerRule),
        Box::new(MigrationConsistencyRule),
        Box::new(CoverageThresholdRule),
    ]
}
