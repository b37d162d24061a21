//! Report rendering configuration.

use serde::{Deserialize, Serialize};

/// Report formats understood by the reporters.
pub const REPORT_FORMATS: &[&str] = &["text", "json", "junit"];

/// Configuration for report output.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Output format: "text" | "json" | "junit". Default: "text".
    pub format: Option<String>,
    /// ANSI color in the text report. Default: false.
    pub color: Option<bool>,
}

impl ReportConfig {
    pub fn effective_format(&self) -> &str {
        self.format.as_deref().unwrap_or("text")
    }

    pub fn effective_color(&self) -> bool {
        self.color.unwrap_or(false)
    }
}
