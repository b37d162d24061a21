//! Change-set classification against the gate configuration.

use std::path::{Path, PathBuf};

use gatekeep_core::config::{GateConfig, MigrationDetection};
use gatekeep_core::errors::ConfigError;
use gatekeep_core::types::collections::FxHashSet;
use gatekeep_core::ChangeSet;
use glob::Pattern;

use super::types::ChangeSetScan;

/// Classifies change-set paths into schema files, migrations, and marker-scan
/// candidates.
pub struct ChangeSetScanner {
    root: PathBuf,
    schema_prefixes: Vec<String>,
    migrations_dir: String,
    migration_pattern: Pattern,
    detection: MigrationDetection,
    extensions: Vec<String>,
}

impl ChangeSetScanner {
    /// Build a scanner from a resolved configuration.
    pub fn from_config(config: &GateConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            root: config.root.clone(),
            schema_prefixes: config.migrations.effective_schema_prefixes()?,
            migrations_dir: config.migrations.effective_dir()?,
            migration_pattern: config.migrations.compiled_file_pattern()?,
            detection: config.migrations.effective_detection(),
            extensions: config.marker.effective_extensions(),
        })
    }

    /// Produce the structured view of `change_set`.
    ///
    /// A missing migrations directory is reported as absent, never as an error.
    pub fn scan(&self, change_set: &ChangeSet) -> ChangeSetScan {
        let schema_paths: Vec<String> = change_set
            .iter()
            .filter(|p| self.is_schema_path(p))
            .map(str::to_string)
            .collect();

        let candidates: Vec<String> = change_set
            .iter()
            .filter(|p| self.is_marker_candidate(p))
            .map(str::to_string)
            .collect();

        let dir = self.root.join(&self.migrations_dir);
        let migrations_dir_present = dir.is_dir();
        let listing = if migrations_dir_present {
            self.list_migrations(&dir)
        } else {
            Vec::new()
        };

        let migration_files_added: Vec<String> = match self.detection {
            MigrationDetection::Directory => listing
                .iter()
                .map(|name| format!("{}/{}", self.migrations_dir, name))
                .collect(),
            MigrationDetection::Changeset => {
                let on_disk: FxHashSet<&str> = listing.iter().map(String::as_str).collect();
                change_set
                    .iter()
                    .filter(|p| {
                        self.migration_name(p)
                            .is_some_and(|name| on_disk.contains(name))
                    })
                    .map(str::to_string)
                    .collect()
            }
        };

        tracing::debug!(
            schema = schema_paths.len(),
            candidates = candidates.len(),
            migrations = migration_files_added.len(),
            migrations_dir_present,
            "change set scanned"
        );

        ChangeSetScan {
            touches_schema: !schema_paths.is_empty(),
            schema_paths,
            migrations_dir_present,
            migration_files_added,
            candidate_files_for_marker_scan: candidates,
        }
    }

    fn is_schema_path(&self, path: &str) -> bool {
        self.schema_prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
    }

    fn is_marker_candidate(&self, path: &str) -> bool {
        Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }

    /// File name of `path` when it sits directly inside the migrations
    /// directory and matches the migration glob.
    fn migration_name<'p>(&self, path: &'p str) -> Option<&'p str> {
        let rest = path.strip_prefix(self.migrations_dir.as_str())?;
        let name = rest.strip_prefix('/')?;
        if name.is_empty() || name.contains('/') || !self.migration_pattern.matches(name) {
            return None;
        }
        Some(name)
    }

    /// Sorted names of matching regular files directly inside `dir`.
    fn list_migrations(&self, dir: &Path) -> Vec<String> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    dir = %dir.display(),
                    error = %e,
                    "cannot list migrations directory"
                );
                return Vec::new();
            }
        };

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| self.migration_pattern.matches(name))
            .collect();
        names.sort();
        names
    }
}
