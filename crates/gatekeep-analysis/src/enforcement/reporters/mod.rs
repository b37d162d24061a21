//! Reporters: output formats for a gate verdict.
//!
//! 3 reporter formats: line-oriented text, JSON, JUnit XML.

pub mod json;
pub mod junit;
pub mod text;

use crate::enforcement::types::GateVerdict;

/// Trait for report generation.
pub trait Reporter: Send + Sync {
    fn name(&self) -> &'static str;
    fn generate(&self, verdict: &GateVerdict) -> Result<String, String>;
}

/// Create a reporter by format name. `color` only affects `text`.
///
/// Every name in `gatekeep_core::config::report_config::REPORT_FORMATS`,
/// which config validation checks against, has a reporter here.
pub fn create_reporter(format: &str, color: bool) -> Option<Box<dyn Reporter>> {
    match format {
        "text" => Some(Box::new(text::TextReporter::new(color))),
        "json" => Some(Box::new(json::JsonReporter)),
        "junit" => Some(Box::new(junit::JUnitReporter::new())),
        _ => None,
    }
}
