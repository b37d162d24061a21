//! Scanner data types.

use serde::{Deserialize, Serialize};

/// Structured view of a change set, computed once per run and shared by
/// every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSetScan {
    /// True when any changed path starts with a schema prefix.
    pub touches_schema: bool,
    /// The changed paths that matched a schema prefix, in change-set order.
    pub schema_paths: Vec<String>,
    /// Whether the migrations directory exists under the project root.
    pub migrations_dir_present: bool,
    /// Migration files that count as newly added, as root-relative paths.
    pub migration_files_added: Vec<String>,
    /// Changed paths eligible for the marker scan, in change-set order.
    pub candidate_files_for_marker_scan: Vec<String>,
}

impl ChangeSetScan {
    /// First schema path that triggered the migration check, if any.
    pub fn first_schema_path(&self) -> Option<&str> {
        self.schema_paths.first().map(String::as_str)
    }
}
