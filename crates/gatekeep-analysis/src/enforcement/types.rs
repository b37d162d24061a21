//! Core types for gate evaluation: findings, per-rule results, the verdict.

use std::fmt;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Finding severity. Only `Fail` affects the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Fail,
    Warn,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fail => "fail",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported fact produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    pub path: Option<String>,
}

impl Finding {
    pub fn new(rule_id: &str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            severity,
            message: message.into(),
            path: None,
        }
    }

    pub fn fail(rule_id: &str, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Fail, message)
    }

    pub fn warn(rule_id: &str, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Warn, message)
    }

    pub fn info(rule_id: &str, message: impl Into<String>) -> Self {
        Self::new(rule_id, Severity::Info, message)
    }

    /// Attach the path the finding is about.
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn is_fail(&self) -> bool {
        self.severity == Severity::Fail
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {} ({})", self.severity, self.message, path),
            None => write!(f, "{}: {}", self.severity, self.message),
        }
    }
}

/// Outcome of one rule in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub passed: bool,
    pub findings: Vec<Finding>,
}

impl RuleResult {
    /// Build a result whose `passed` flag is derived from the findings.
    pub fn from_findings(rule_id: &str, findings: Vec<Finding>) -> Self {
        let passed = !findings.iter().any(Finding::is_fail);
        Self {
            rule_id: rule_id.to_string(),
            passed,
            findings,
        }
    }

    /// A passing result with no findings.
    pub fn pass(rule_id: &str) -> Self {
        Self::from_findings(rule_id, Vec::new())
    }

    /// A failing result describing why the rule could not complete.
    pub fn errored(rule_id: &str, error: impl Into<String>) -> Self {
        Self::from_findings(rule_id, vec![Finding::fail(rule_id, error)])
    }

    pub fn fail_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_fail()).count()
    }
}

/// Aggregate decision of one gate run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateVerdict {
    pub passed: bool,
    pub results: Vec<RuleResult>,
    pub summary_text: String,
}

impl GateVerdict {
    /// Aggregate rule results, keeping their order.
    pub fn from_results(results: Vec<RuleResult>) -> Self {
        let passed = results.iter().all(|r| r.passed);
        let summary_text = summarize(passed, &results);
        Self {
            passed,
            results,
            summary_text,
        }
    }

    /// Ids of the rules that failed, in result order.
    pub fn failed_rules(&self) -> Vec<&str> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.rule_id.as_str())
            .collect()
    }

    /// xxh3-64 of the canonical JSON form, hex encoded. Two runs over the
    /// same inputs produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_vec(self).unwrap_or_default();
        format!("{:016x}", xxh3_64(&canonical))
    }
}

fn summarize(passed: bool, results: &[RuleResult]) -> String {
    let total = results.len();
    if passed {
        return format!("gate passed: {total}/{total} rules passed");
    }
    let failed: Vec<&str> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.rule_id.as_str())
        .collect();
    format!(
        "gate failed: {} of {} rules failed ({})",
        failed.len(),
        total,
        failed.join(", ")
    )
}
