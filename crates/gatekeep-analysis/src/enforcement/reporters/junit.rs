//! JUnit XML reporter.
//!
//! Each rule maps to one `<testcase>`; failing rules carry a `<failure>`
//! listing their `fail` findings. Other findings go to `<system-out>`.

use quick_xml::escape::escape;

use super::Reporter;
use crate::enforcement::types::{Finding, GateVerdict, Severity};

/// JUnit XML reporter.
pub struct JUnitReporter;

impl JUnitReporter {
    pub fn new() -> Self {
        Self
    }

    fn lines(findings: &[Finding], pick: impl Fn(Severity) -> bool) -> String {
        findings
            .iter()
            .filter(|f| pick(f.severity))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for JUnitReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JUnitReporter {
    fn name(&self) -> &'static str {
        "junit"
    }

    fn generate(&self, verdict: &GateVerdict) -> Result<String, String> {
        let total = verdict.results.len();
        let failures = verdict.results.iter().filter(|r| !r.passed).count();

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<testsuites name=\"gatekeep\" tests=\"{total}\" failures=\"{failures}\" errors=\"0\">\n"
        ));
        xml.push_str(&format!(
            "  <testsuite name=\"gatekeep\" tests=\"{total}\" failures=\"{failures}\" errors=\"0\">\n"
        ));

        for result in &verdict.results {
            let name = escape(result.rule_id.as_str());
            let notes = Self::lines(&result.findings, |s| s != Severity::Fail);

            if result.passed && notes.is_empty() {
                xml.push_str(&format!(
                    "    <testcase name=\"{name}\" classname=\"gatekeep.rules\" />\n"
                ));
                continue;
            }

            xml.push_str(&format!(
                "    <testcase name=\"{name}\" classname=\"gatekeep.rules\">\n"
            ));
            if !result.passed {
                let details = Self::lines(&result.findings, |s| s == Severity::Fail);
                let message = result
                    .findings
                    .iter()
                    .find(|f| f.is_fail())
                    .map(|f| f.message.as_str())
                    .unwrap_or("rule failed");
                xml.push_str(&format!(
                    "      <failure message=\"{}\" type=\"fail\">{}</failure>\n",
                    escape(message),
                    escape(details.as_str())
                ));
            }
            if !notes.is_empty() {
                xml.push_str(&format!(
                    "      <system-out>{}</system-out>\n",
                    escape(notes.as_str())
                ));
            }
            xml.push_str("    </testcase>\n");
        }

        xml.push_str("  </testsuite>\n");
        xml.push_str("</testsuites>\n");
        Ok(xml)
    }
}
