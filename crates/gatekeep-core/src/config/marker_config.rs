//! Disallowed-marker configuration.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Stale "remove after fix" sentinel left in Python-style comments.
pub const DEFAULT_MARKER_PATTERN: &str = r"^\s*#\s*TODO\s*:\s*remove after fix";

/// Configuration for the marker rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MarkerConfig {
    /// Line pattern (regex). Anchored to line start; case-sensitive.
    pub pattern: Option<String>,
    /// File extensions eligible for scanning, without the dot. Default: `["py"]`.
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl MarkerConfig {
    /// Returns the pattern source anchored as a whole, so every alternative
    /// in `a|b` must match at line start.
    pub fn effective_pattern(&self) -> String {
        let raw = self.pattern.as_deref().unwrap_or(DEFAULT_MARKER_PATTERN);
        format!("^(?:{raw})")
    }

    /// Returns the effective extension list, defaulting to `["py"]`.
    pub fn effective_extensions(&self) -> Vec<String> {
        if self.extensions.is_empty() {
            vec!["py".to_string()]
        } else {
            self.extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect()
        }
    }

    /// Compile the effective pattern.
    pub fn compiled_pattern(&self) -> Result<Regex, ConfigError> {
        let source = self.effective_pattern();
        Regex::new(&source).map_err(|e| ConfigError::InvalidValue {
            field: "marker.pattern".to_string(),
            message: e.to_string(),
        })
    }
}
