//! Disallowed marker rule: stale "remove after fix" sentinels must not merge.

use std::io::ErrorKind;

use gatekeep_core::errors::RuleError;
use regex::Regex;

use super::types::{GateInput, GateRule};
use crate::enforcement::types::{Finding, RuleResult};

pub const MARKER_RULE_ID: &str = "disallowed-marker";

/// Fails when any candidate file has a line starting with the marker pattern.
pub struct MarkerRule;

impl MarkerRule {
    /// Scan one file. Returns the finding for it, if any.
    fn scan_file(
        &self,
        input: &GateInput<'_>,
        pattern: &Regex,
        rel_path: &str,
    ) -> Option<Finding> {
        let full = input.config.root.join(rel_path);
        let bytes = match std::fs::read(&full) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Some(
                    Finding::warn(MARKER_RULE_ID, "file not present on disk, not scanned")
                        .at(rel_path),
                );
            }
            Err(e) => {
                return Some(
                    Finding::fail(MARKER_RULE_ID, format!("cannot read file: {e}")).at(rel_path),
                );
            }
        };

        let content = match std::str::from_utf8(&bytes) {
            Ok(content) => content,
            Err(e) => {
                return Some(
                    Finding::fail(MARKER_RULE_ID, format!("cannot decode file as UTF-8: {e}"))
                        .at(rel_path),
                );
            }
        };

        content
            .lines()
            .position(|line| pattern.is_match(line))
            .map(|idx| {
                Finding::fail(
                    MARKER_RULE_ID,
                    format!("disallowed marker at line {}", idx + 1),
                )
                .at(rel_path)
            })
    }
}

impl GateRule for MarkerRule {
    fn id(&self) -> &'static str {
        MARKER_RULE_ID
    }

    fn name(&self) -> &'static str {
        "Disallowed Marker"
    }

    fn description(&self) -> &'static str {
        "Rejects changed files containing a line-start disallowed marker"
    }

    fn evaluate(&self, input: &GateInput<'_>) -> Result<RuleResult, RuleError> {
        let pattern = input
            .config
            .marker
            .compiled_pattern()
            .map_err(|e| RuleError::EvaluationFailed(e.to_string()))?;

        let findings: Vec<Finding> = input
            .scan
            .candidate_files_for_marker_scan
            .iter()
            .filter_map(|path| self.scan_file(input, &pattern, path))
            .collect();

        Ok(RuleResult::from_findings(MARKER_RULE_ID, findings))
    }
}
