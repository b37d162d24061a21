//! Text reporter: one line per rule plus a summary line.

use super::Reporter;
use crate::enforcement::types::{Finding, GateVerdict, RuleResult};

/// Deterministic line-oriented report for CI logs.
///
/// ```text
/// disallowed-marker: PASS
/// migration-consistency: FAIL - fail: schema changed but migrations directory missing (app/models/user.py)
/// gate failed: 1 of 2 rules failed (migration-consistency)
/// ```
pub struct TextReporter {
    pub use_color: bool,
}

impl TextReporter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn status(&self, passed: bool) -> String {
        let (label, color) = if passed {
            ("PASS", "\x1b[32m") // green
        } else {
            ("FAIL", "\x1b[31m") // red
        };
        if self.use_color {
            format!("{color}{label}\x1b[0m")
        } else {
            label.to_string()
        }
    }

    fn rule_line(&self, result: &RuleResult) -> String {
        let mut line = format!("{}: {}", result.rule_id, self.status(result.passed));
        if !result.findings.is_empty() {
            let joined: Vec<String> = result.findings.iter().map(single_line).collect();
            line.push_str(" - ");
            line.push_str(&joined.join("; "));
        }
        line
    }
}

impl Default for TextReporter {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Keep each finding on one physical line.
fn single_line(finding: &Finding) -> String {
    finding.to_string().replace(['\r', '\n'], " ")
}

impl Reporter for TextReporter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn generate(&self, verdict: &GateVerdict) -> Result<String, String> {
        let mut output = String::new();
        for result in &verdict.results {
            output.push_str(&self.rule_line(result));
            output.push('\n');
        }
        output.push_str(&verdict.summary_text);
        output.push('\n');
        Ok(output)
    }
}
