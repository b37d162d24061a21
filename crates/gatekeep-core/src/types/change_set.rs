//! ChangeSet: the ordered, de-duplicated list of paths touched by a change.

use std::io::BufRead;

use serde::{Deserialize, Serialize};

use super::collections::FxHashSet;
use crate::errors::ChangeSetError;

/// Paths touched by the proposed change, relative to the project root.
///
/// Invariants: every path is relative, non-empty, `/`-separated, free of `.`
/// and `..` components, and appears once. Order of first appearance is kept
/// so reports stay diffable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeSet {
    paths: Vec<String>,
}

impl ChangeSet {
    /// Build a change set from caller-supplied paths.
    ///
    /// Blank entries are dropped. Absolute paths and paths that climb out of
    /// the root are rejected.
    pub fn new<I, S>(paths: I) -> Result<Self, ChangeSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut out = Vec::new();

        for raw in paths {
            let Some(path) = normalize(raw.as_ref())? else {
                continue;
            };
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }

        Ok(Self { paths: out })
    }

    /// Read newline-separated paths, e.g. the output of `git diff --name-only`.
    pub fn read_list<R: BufRead>(
        reader: R,
        source_name: &str,
    ) -> Result<Vec<String>, ChangeSetError> {
        reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ChangeSetError::ListUnreadable {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Normalize one raw path. `Ok(None)` means the entry was blank.
///
/// Config paths compared against change-set entries go through the same
/// function so both sides agree on separators and `.` segments.
pub(crate) fn normalize(raw: &str) -> Result<Option<String>, ChangeSetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let unified = trimmed.replace('\\', "/");
    if unified.starts_with('/') || has_drive_prefix(&unified) {
        return Err(ChangeSetError::AbsolutePath(trimmed.to_string()));
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return Err(ChangeSetError::ParentTraversal(trimmed.to_string())),
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        return Ok(None);
    }
    Ok(Some(segments.join("/")))
}

/// `C:/...` style prefixes count as absolute regardless of host platform.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
