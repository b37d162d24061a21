//! Property-based tests for gate invariants.
//!
//! Uses proptest to fuzz-verify:
//!   - schema-free change sets never trip the migration rule
//!   - schema changes with no migration always fail
//!   - the coverage threshold is a non-strict comparison
//!   - the verdict is the AND of rule results, independent of order

use proptest::prelude::*;
use tempfile::TempDir;

use gatekeep_analysis::enforcement::rules::migration_consistency::{
    MSG_DIR_MISSING, MSG_NO_MIGRATION,
};
use gatekeep_analysis::enforcement::rules::{
    CoverageThresholdRule, GateInput, GateRule, MigrationConsistencyRule,
};
use gatekeep_analysis::enforcement::{Finding, GateEngine, RuleResult};
use gatekeep_analysis::scanner::{ChangeSetScan, ChangeSetScanner};
use gatekeep_core::config::CoverageConfig;
use gatekeep_core::errors::RuleError;
use gatekeep_core::{ChangeSet, GateConfig};

const IDS: [&str; 8] = ["r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7"];

struct BoolRule {
    id: &'static str,
    pass: bool,
}

impl GateRule for BoolRule {
    fn id(&self) -> &'static str {
        self.id
    }
    fn name(&self) -> &'static str {
        "Bool"
    }
    fn description(&self) -> &'static str {
        "Passes or fails on demand"
    }
    fn evaluate(&self, _input: &GateInput<'_>) -> Result<RuleResult, RuleError> {
        let findings = if self.pass {
            vec![]
        } else {
            vec![Finding::fail(self.id, "failed")]
        };
        Ok(RuleResult::from_findings(self.id, findings))
    }
}

fn verdict_for(outcomes: &[(usize, bool)]) -> bool {
    let rules: Vec<Box<dyn GateRule>> = outcomes
        .iter()
        .map(|&(i, pass)| Box::new(BoolRule { id: IDS[i], pass }) as Box<dyn GateRule>)
        .collect();
    let engine = GateEngine::with_rules(rules).unwrap();
    let config = GateConfig::default();
    let scan = ChangeSetScan::default();
    engine.run(&GateInput::new(&config, &scan)).passed
}

/// Relative paths that never start with the default schema prefix.
fn non_schema_path() -> impl Strategy<Value = String> {
    "[a-z]{1,8}(/[a-z]{1,8}){0,3}\\.(py|md|txt)".prop_filter("outside schema prefix", |p| {
        !p.starts_with("app/models/")
    })
}

proptest! {
    /// Schema-free change sets pass whatever the migrations directory holds.
    #[test]
    fn prop_schema_free_change_sets_pass(
        paths in prop::collection::vec(non_schema_path(), 0..12),
        dir_present in any::<bool>(),
        migrations in prop::collection::vec("[0-9]{4}_[a-z]{3}\\.py", 0..4),
    ) {
        let cs = ChangeSet::new(&paths).unwrap();
        let config = GateConfig::default();
        let scan = ChangeSetScan {
            migrations_dir_present: dir_present,
            migration_files_added: migrations,
            ..ChangeSetScanner::from_config(&config).unwrap().scan(&cs)
        };
        let result = MigrationConsistencyRule
            .evaluate(&GateInput::new(&config, &scan))
            .unwrap();
        prop_assert!(result.passed);
        prop_assert!(result.findings.is_empty());
    }

    /// A schema change with no migrations on disk always fails.
    #[test]
    fn prop_schema_change_without_migration_fails(
        model in "[a-z]{1,10}\\.py",
        others in prop::collection::vec(non_schema_path(), 0..6),
        create_dir in any::<bool>(),
    ) {
        let dir = TempDir::new().unwrap();
        if create_dir {
            std::fs::create_dir_all(dir.path().join("app/migrations")).unwrap();
        }
        let config = GateConfig { root: dir.path().to_path_buf(), ..Default::default() };
        let mut paths = others;
        paths.push(format!("app/models/{model}"));
        let cs = ChangeSet::new(&paths).unwrap();
        let scan = ChangeSetScanner::from_config(&config).unwrap().scan(&cs);

        let result = MigrationConsistencyRule
            .evaluate(&GateInput::new(&config, &scan))
            .unwrap();
        prop_assert!(!result.passed);
        let expected = if create_dir { MSG_NO_MIGRATION } else { MSG_DIR_MISSING };
        prop_assert_eq!(result.findings[0].message.as_str(), expected);
    }

    /// Coverage passes iff rate >= threshold.
    #[test]
    fn prop_coverage_threshold_non_strict(rate in 0.0f64..=1.0, threshold in 0.0f64..=1.0) {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("cov")).unwrap();
        std::fs::write(
            dir.path().join("cov/coverage.xml"),
            format!(r#"<coverage line-rate="{rate}"/>"#),
        )
        .unwrap();
        let config = GateConfig {
            root: dir.path().to_path_buf(),
            coverage: CoverageConfig { threshold: Some(threshold), ..Default::default() },
            ..Default::default()
        };
        let scan = ChangeSetScan::default();

        let result = CoverageThresholdRule
            .evaluate(&GateInput::new(&config, &scan))
            .unwrap();
        prop_assert_eq!(result.passed, rate >= threshold);

        // Boundary: equal values always pass.
        let at_boundary = GateConfig {
            coverage: CoverageConfig { threshold: Some(rate), ..Default::default() },
            ..config.clone()
        };
        let boundary = CoverageThresholdRule
            .evaluate(&GateInput::new(&at_boundary, &scan))
            .unwrap();
        prop_assert!(boundary.passed);
    }

    /// Registration order never changes the aggregate.
    #[test]
    fn prop_aggregate_is_order_independent(
        (outcomes, shuffled) in prop::collection::vec(any::<bool>(), 0..8).prop_flat_map(|passes| {
            let indexed: Vec<(usize, bool)> = passes.into_iter().enumerate().collect();
            (Just(indexed.clone()), Just(indexed).prop_shuffle())
        })
    ) {
        let expected = outcomes.iter().all(|&(_, pass)| pass);
        prop_assert_eq!(verdict_for(&outcomes), expected);
        prop_assert_eq!(verdict_for(&shuffled), expected);
    }
}
