//! Top-level gate configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::report_config::REPORT_FORMATS;
use super::{
    CoverageConfig, EngineConfig, MarkerConfig, MigrationConfig, MigrationDetection, ReportConfig,
};
use crate::errors::ConfigError;

/// Project-level config file looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "gatekeep.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`GATEKEEP_*`)
/// 3. Project config (`gatekeep.toml` in the project root, or `--config`)
/// 4. Compiled defaults
///
/// One instance is built per gate run and handed to every rule by reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    /// Project root all relative paths resolve against. Never read from TOML.
    #[serde(skip)]
    pub root: PathBuf,
    pub gate: EngineConfig,
    pub coverage: CoverageConfig,
    pub migrations: MigrationConfig,
    pub marker: MarkerConfig,
    pub report: ReportConfig,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            gate: EngineConfig::default(),
            coverage: CoverageConfig::default(),
            migrations: MigrationConfig::default(),
            marker: MarkerConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub threshold: Option<f64>,
    pub coverage_report: Option<String>,
    pub migrations_dir: Option<String>,
    pub schema_prefixes: Vec<String>,
    pub marker_pattern: Option<String>,
    pub marker_extensions: Vec<String>,
    pub enabled_rules: Vec<String>,
    pub format: Option<String>,
    pub color: Option<bool>,
    pub parallel: Option<bool>,
}

impl GateConfig {
    /// Load configuration with layered resolution, reading `GATEKEEP_*`
    /// variables from the process environment.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        Self::load_with_env(root, config_file, cli_overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`GateConfig::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
        env: F,
    ) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if !root.is_dir() {
            return Err(ConfigError::ValidationFailed {
                field: "root".to_string(),
                message: format!("{} is not a directory", root.display()),
            });
        }

        let mut config = Self {
            root: root.to_path_buf(),
            ..Self::default()
        };

        // Layer 3: project config. An explicit path must exist; the implicit
        // one is optional.
        match config_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                Self::merge_toml_file(&mut config, path)?;
            }
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.is_file() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config, env)?;

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %config.root.display(), "gate configuration resolved");

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &GateConfig) -> Result<(), ConfigError> {
        let threshold = config.coverage.effective_threshold();
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::ValidationFailed {
                field: "coverage.threshold".to_string(),
                message: "must be between 0.0 and 1.0".to_string(),
            });
        }
        if config.coverage.effective_report_path().trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "coverage.report_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        config.migrations.effective_dir()?;
        config.migrations.effective_schema_prefixes()?;
        config.migrations.compiled_file_pattern()?;
        config.marker.compiled_pattern()?;

        let format = config.report.effective_format();
        if !REPORT_FORMATS.contains(&format) {
            return Err(ConfigError::ValidationFailed {
                field: "report.format".to_string(),
                message: format!(
                    "unknown format {format:?}, expected one of {}",
                    REPORT_FORMATS.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut GateConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: GateConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    fn merge(base: &mut GateConfig, other: &GateConfig) {
        // Engine
        if !other.gate.enabled_rules.is_empty() {
            base.gate.enabled_rules = other.gate.enabled_rules.clone();
        }
        if other.gate.parallel.is_some() {
            base.gate.parallel = other.gate.parallel;
        }

        // Coverage
        if other.coverage.threshold.is_some() {
            base.coverage.threshold = other.coverage.threshold;
        }
        if other.coverage.report_path.is_some() {
            base.coverage.report_path = other.coverage.report_path.clone();
        }

        // Migrations
        if !other.migrations.schema_prefixes.is_empty() {
            base.migrations.schema_prefixes = other.migrations.schema_prefixes.clone();
        }
        if other.migrations.dir.is_some() {
            base.migrations.dir = other.migrations.dir.clone();
        }
        if other.migrations.file_pattern.is_some() {
            base.migrations.file_pattern = other.migrations.file_pattern.clone();
        }
        if other.migrations.detection.is_some() {
            base.migrations.detection = other.migrations.detection;
        }

        // Marker
        if other.marker.pattern.is_some() {
            base.marker.pattern = other.marker.pattern.clone();
        }
        if !other.marker.extensions.is_empty() {
            base.marker.extensions = other.marker.extensions.clone();
        }

        // Report
        if other.report.format.is_some() {
            base.report.format = other.report.format.clone();
        }
        if other.report.color.is_some() {
            base.report.color = other.report.color;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `GATEKEEP_COVERAGE_THRESHOLD`, `GATEKEEP_MIGRATIONS_DIR`, etc.
    /// A value that does not parse is an error, never ignored.
    fn apply_env_overrides<F>(config: &mut GateConfig, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = env("GATEKEEP_COVERAGE_THRESHOLD") {
            let v = val.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                field: "GATEKEEP_COVERAGE_THRESHOLD".to_string(),
                message: e.to_string(),
            })?;
            config.coverage.threshold = Some(v);
        }
        if let Some(val) = env("GATEKEEP_COVERAGE_REPORT") {
            config.coverage.report_path = Some(val);
        }
        if let Some(val) = env("GATEKEEP_MIGRATIONS_DIR") {
            config.migrations.dir = Some(val);
        }
        if let Some(val) = env("GATEKEEP_SCHEMA_PREFIXES") {
            let prefixes = split_list(&val);
            if !prefixes.is_empty() {
                config.migrations.schema_prefixes = prefixes;
            }
        }
        if let Some(val) = env("GATEKEEP_MIGRATION_DETECTION") {
            let mode = MigrationDetection::parse(&val).ok_or_else(|| ConfigError::InvalidValue {
                field: "GATEKEEP_MIGRATION_DETECTION".to_string(),
                message: format!("expected \"changeset\" or \"directory\", got {val:?}"),
            })?;
            config.migrations.detection = Some(mode);
        }
        if let Some(val) = env("GATEKEEP_MARKER_PATTERN") {
            config.marker.pattern = Some(val);
        }
        if let Some(val) = env("GATEKEEP_MARKER_EXTENSIONS") {
            let extensions = split_list(&val);
            if !extensions.is_empty() {
                config.marker.extensions = extensions;
            }
        }
        if let Some(val) = env("GATEKEEP_REPORT_FORMAT") {
            config.report.format = Some(val.trim().to_string());
        }
        if let Some(val) = env("GATEKEEP_PARALLEL") {
            let v = val.trim().parse::<bool>().map_err(|e| ConfigError::InvalidValue {
                field: "GATEKEEP_PARALLEL".to_string(),
                message: e.to_string(),
            })?;
            config.gate.parallel = Some(v);
        }
        Ok(())
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut GateConfig, cli: &CliOverrides) {
        if let Some(v) = cli.threshold {
            config.coverage.threshold = Some(v);
        }
        if let Some(ref v) = cli.coverage_report {
            config.coverage.report_path = Some(v.clone());
        }
        if let Some(ref v) = cli.migrations_dir {
            config.migrations.dir = Some(v.clone());
        }
        if !cli.schema_prefixes.is_empty() {
            config.migrations.schema_prefixes = cli.schema_prefixes.clone();
        }
        if let Some(ref v) = cli.marker_pattern {
            config.marker.pattern = Some(v.clone());
        }
        if !cli.marker_extensions.is_empty() {
            config.marker.extensions = cli.marker_extensions.clone();
        }
        if !cli.enabled_rules.is_empty() {
            config.gate.enabled_rules = cli.enabled_rules.clone();
        }
        if let Some(ref v) = cli.format {
            config.report.format = Some(v.clone());
        }
        if let Some(v) = cli.color {
            config.report.color = Some(v);
        }
        if let Some(v) = cli.parallel {
            config.gate.parallel = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Split a comma-separated env value, dropping blanks.
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
