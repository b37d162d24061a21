//! Schema/migration consistency configuration.

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::errors::{ChangeSetError, ConfigError};
use crate::types::change_set::normalize;

/// How a migration counts as "newly added".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationDetection {
    /// The migration must be part of the change set and present on disk.
    #[default]
    Changeset,
    /// Any matching file in the migrations directory counts.
    Directory,
}

impl MigrationDetection {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "changeset" => Some(Self::Changeset),
            "directory" => Some(Self::Directory),
            _ => None,
        }
    }
}

/// Configuration for the migration consistency rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct MigrationConfig {
    /// Path prefixes that mark a schema/model file. Default: `["app/models/"]`.
    #[serde(default)]
    pub schema_prefixes: Vec<String>,
    /// Migrations directory, relative to the project root. Default: `app/migrations`.
    pub dir: Option<String>,
    /// File-name glob for migration files. Default: `*.py`.
    pub file_pattern: Option<String>,
    /// Detection mode. Default: `changeset`.
    pub detection: Option<MigrationDetection>,
}

impl MigrationConfig {
    /// Schema prefixes normalized like change-set paths. A trailing separator
    /// is kept, so `app/models/` never matches `app/models_old/x.py`.
    pub fn effective_schema_prefixes(&self) -> Result<Vec<String>, ConfigError> {
        if self.schema_prefixes.is_empty() {
            return Ok(vec!["app/models/".to_string()]);
        }
        self.schema_prefixes
            .iter()
            .map(|raw| {
                let mut prefix = normalize_config_path("migrations.schema_prefixes", raw)?;
                if raw.trim_end().ends_with(['/', '\\']) {
                    prefix.push('/');
                }
                Ok(prefix)
            })
            .collect()
    }

    /// Migrations directory normalized like change-set paths, without
    /// trailing separators.
    pub fn effective_dir(&self) -> Result<String, ConfigError> {
        normalize_config_path("migrations.dir", self.dir.as_deref().unwrap_or("app/migrations"))
    }

    pub fn effective_file_pattern(&self) -> &str {
        self.file_pattern.as_deref().unwrap_or("*.py")
    }

    pub fn effective_detection(&self) -> MigrationDetection {
        self.detection.unwrap_or_default()
    }

    /// Compile the file-name glob.
    pub fn compiled_file_pattern(&self) -> Result<Pattern, ConfigError> {
        Pattern::new(self.effective_file_pattern()).map_err(|e| ConfigError::InvalidValue {
            field: "migrations.file_pattern".to_string(),
            message: e.to_string(),
        })
    }
}

/// Normalize a root-relative config path. Blank, absolute, and escaping
/// values are rejected.
fn normalize_config_path(field: &str, raw: &str) -> Result<String, ConfigError> {
    match normalize(raw) {
        Ok(Some(path)) => Ok(path),
        Ok(None) => Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must not be empty".to_string(),
        }),
        Err(ChangeSetError::AbsolutePath(_)) => Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("{raw:?} must be relative to the project root"),
        }),
        Err(_) => Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: format!("{raw:?} must not escape the project root"),
        }),
    }
}
