//! JSON reporter: structured output including the verdict fingerprint.

use serde_json::json;

use super::Reporter;
use crate::enforcement::types::GateVerdict;

/// JSON reporter for machine-readable output.
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, verdict: &GateVerdict) -> Result<String, String> {
        let results: Vec<serde_json::Value> = verdict
            .results
            .iter()
            .map(|r| {
                json!({
                    "rule_id": r.rule_id,
                    "passed": r.passed,
                    "fail_count": r.fail_count(),
                    "findings": r.findings.iter().map(|f| json!({
                        "severity": f.severity,
                        "message": f.message,
                        "path": f.path,
                    })).collect::<Vec<_>>(),
                })
            })
            .collect();

        let output = json!({
            "passed": verdict.passed,
            "summary": verdict.summary_text,
            "fingerprint": verdict.fingerprint(),
            "rule_count": verdict.results.len(),
            "results": results,
        });

        serde_json::to_string_pretty(&output).map_err(|e| e.to_string())
    }
}
