//! Migration consistency rule: schema changes must ship with a migration.

use gatekeep_core::errors::RuleError;

use super::types::{GateInput, GateRule};
use crate::enforcement::types::{Finding, RuleResult};

pub const MIGRATION_RULE_ID: &str = "migration-consistency";

pub const MSG_DIR_MISSING: &str = "schema changed but migrations directory missing";
pub const MSG_NO_MIGRATION: &str = "schema changed but no new migration file detected";

/// Requires a new migration whenever a schema/model path changes.
/// The migration itself is not validated.
pub struct MigrationConsistencyRule;

impl GateRule for MigrationConsistencyRule {
    fn id(&self) -> &'static str {
        MIGRATION_RULE_ID
    }

    fn name(&self) -> &'static str {
        "Migration Consistency"
    }

    fn description(&self) -> &'static str {
        "Requires a new migration file whenever schema files change"
    }

    fn evaluate(&self, input: &GateInput<'_>) -> Result<RuleResult, RuleError> {
        let scan = input.scan;
        let Some(trigger) = scan.first_schema_path() else {
            return Ok(RuleResult::pass(MIGRATION_RULE_ID));
        };

        let finding = if !scan.migrations_dir_present {
            Finding::fail(MIGRATION_RULE_ID, MSG_DIR_MISSING).at(trigger)
        } else if scan.migration_files_added.is_empty() {
            Finding::fail(MIGRATION_RULE_ID, MSG_NO_MIGRATION).at(trigger)
        } else {
            Finding::info(
                MIGRATION_RULE_ID,
                format!(
                    "schema change accompanied by {}",
                    scan.migration_files_added.join(", ")
                ),
            )
        };

        Ok(RuleResult::from_findings(MIGRATION_RULE_ID, vec![finding]))
    }
}
