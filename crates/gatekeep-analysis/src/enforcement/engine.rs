//! Gate engine: ordered rule registry with per-rule isolation.

use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use gatekeep_core::errors::{ConfigError, RuleError};
use gatekeep_core::types::collections::FxHashSet;
use gatekeep_core::{ChangeSet, GateConfig};
use rayon::prelude::*;

use super::rules::{default_rules, GateInput, GateRule};
use super::types::{GateVerdict, RuleResult};
use crate::scanner::ChangeSetScanner;

/// Runs every registered rule and aggregates the verdict.
///
/// Rules never short-circuit each other: a failing, erroring, or panicking
/// rule still leaves every other rule's result in the verdict. Results keep
/// registration order in both sequential and parallel mode.
pub struct GateEngine {
    rules: Vec<Box<dyn GateRule>>,
    parallel: bool,
}

impl GateEngine {
    /// Create an engine with no rules.
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            parallel: false,
        }
    }

    /// Create an engine with the built-in rules.
    pub fn with_default_rules() -> Self {
        Self {
            rules: default_rules(),
            parallel: false,
        }
    }

    /// Create an engine with custom rules, rejecting duplicate ids.
    pub fn with_rules(rules: Vec<Box<dyn GateRule>>) -> Result<Self, RuleError> {
        let mut engine = Self::new();
        for rule in rules {
            engine.register(rule)?;
        }
        Ok(engine)
    }

    /// Build the engine a resolved configuration asks for: built-in rules,
    /// filtered by `enabled_rules`, scheduled per `parallel`.
    pub fn from_config(config: &GateConfig) -> Result<Self, RuleError> {
        Self::with_default_rules()
            .with_enabled(&config.gate.enabled_rules)
            .map(|engine| engine.with_parallel(config.gate.effective_parallel()))
    }

    /// Append a rule. Ids must be unique.
    pub fn register(&mut self, rule: Box<dyn GateRule>) -> Result<(), RuleError> {
        if self.rules.iter().any(|r| r.id() == rule.id()) {
            return Err(RuleError::DuplicateRule(rule.id().to_string()));
        }
        self.rules.push(rule);
        Ok(())
    }

    /// Keep only the listed rules, in registration order. An empty list keeps
    /// everything; an id no registered rule has is an error.
    pub fn with_enabled(mut self, enabled: &[String]) -> Result<Self, RuleError> {
        if enabled.is_empty() {
            return Ok(self);
        }
        let known: FxHashSet<&str> = self.rules.iter().map(|r| r.id()).collect();
        if let Some(unknown) = enabled.iter().find(|id| !known.contains(id.as_str())) {
            return Err(RuleError::UnknownRule(unknown.clone()));
        }
        self.rules.retain(|r| enabled.iter().any(|id| id == r.id()));
        Ok(self)
    }

    /// Evaluate rules on the rayon pool instead of sequentially.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Scan `change_set` and run every rule against it.
    pub fn run_change_set(
        &self,
        change_set: &ChangeSet,
        config: &GateConfig,
    ) -> Result<GateVerdict, ConfigError> {
        let scan = ChangeSetScanner::from_config(config)?.scan(change_set);
        let input = GateInput::new(config, &scan);
        Ok(self.run(&input))
    }

    /// Run every rule against a prepared input.
    pub fn run(&self, input: &GateInput<'_>) -> GateVerdict {
        let start = Instant::now();
        let results: Vec<RuleResult> = if self.parallel {
            self.rules
                .par_iter()
                .map(|rule| evaluate_isolated(rule.as_ref(), input))
                .collect()
        } else {
            self.rules
                .iter()
                .map(|rule| evaluate_isolated(rule.as_ref(), input))
                .collect()
        };

        let verdict = GateVerdict::from_results(results);
        tracing::info!(
            passed = verdict.passed,
            rules = verdict.results.len(),
            failed = ?verdict.failed_rules(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "{}",
            verdict.summary_text
        );
        verdict
    }
}

impl Default for GateEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

/// Evaluate one rule, converting errors and panics into a failing result.
fn evaluate_isolated(rule: &dyn GateRule, input: &GateInput<'_>) -> RuleResult {
    let rule_id = rule.id();
    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.evaluate(input)));
    let elapsed_us = start.elapsed().as_micros() as u64;

    let result = match outcome {
        // Re-derive so `passed` always matches the findings and the id.
        Ok(Ok(result)) => RuleResult::from_findings(rule_id, result.findings),
        Ok(Err(e)) => {
            tracing::warn!(rule = rule_id, error = %e, "rule returned an error");
            RuleResult::errored(rule_id, e.to_string())
        }
        Err(payload) => {
            let err = RuleError::Panicked {
                rule_id: rule_id.to_string(),
                message: panic_message(payload.as_ref()),
            };
            tracing::warn!(rule = rule_id, error = %err, "rule panicked");
            RuleResult::errored(rule_id, err.to_string())
        }
    };

    tracing::debug!(
        rule = rule_id,
        passed = result.passed,
        findings = result.findings.len(),
        elapsed_us,
        "rule evaluated"
    );
    result
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
