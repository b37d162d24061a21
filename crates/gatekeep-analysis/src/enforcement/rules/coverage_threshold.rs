//! Coverage threshold rule: line coverage must meet the configured minimum.

use gatekeep_core::errors::RuleError;

use super::types::{GateInput, GateRule};
use crate::coverage::{parse_coverage_file, LINE_RATE_ATTR};
use crate::enforcement::types::{Finding, RuleResult};

pub const COVERAGE_RULE_ID: &str = "coverage-threshold";

/// Passes iff the artifact's root `line-rate` is at least the threshold.
/// Artifact problems are failing findings, never crashes.
pub struct CoverageThresholdRule;

impl GateRule for CoverageThresholdRule {
    fn id(&self) -> &'static str {
        COVERAGE_RULE_ID
    }

    fn name(&self) -> &'static str {
        "Coverage Threshold"
    }

    fn description(&self) -> &'static str {
        "Verifies that line coverage meets the configured threshold"
    }

    fn evaluate(&self, input: &GateInput<'_>) -> Result<RuleResult, RuleError> {
        let report_path = input.config.coverage.effective_report_path();
        let threshold = input.config.coverage.effective_threshold();
        let full = input.config.root.join(report_path);

        let summary = match parse_coverage_file(&full) {
            Ok(summary) => summary,
            Err(e) => {
                return Ok(RuleResult::from_findings(
                    COVERAGE_RULE_ID,
                    vec![Finding::fail(COVERAGE_RULE_ID, e.to_string()).at(report_path)],
                ));
            }
        };

        let mut findings = Vec::with_capacity(3);
        if !summary.attribute_present {
            findings.push(
                Finding::warn(
                    COVERAGE_RULE_ID,
                    format!("root element has no {LINE_RATE_ATTR} attribute, treated as 0"),
                )
                .at(report_path),
            );
        }

        let observed = format!(
            "coverage {:.2}% (threshold {:.0}%)",
            summary.line_rate * 100.0,
            threshold * 100.0
        );
        findings.push(Finding::info(COVERAGE_RULE_ID, observed));

        if !summary.meets(threshold) {
            findings.push(Finding::fail(
                COVERAGE_RULE_ID,
                format!(
                    "coverage {:.2}% is below threshold {:.0}%",
                    summary.line_rate * 100.0,
                    threshold * 100.0
                ),
            ));
        }

        Ok(RuleResult::from_findings(COVERAGE_RULE_ID, findings))
    }
}
