//! Result types for snapshot comparison.

use crate::model::ChangePath;
use serde::Serialize;
use std::fmt;

/// How a reported path differs between the older and newer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Key present in the older snapshot only.
    Removed,
    /// Key present in the newer snapshot only.
    Added,
    /// Key present in both with differing content.
    Modified,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => write!(f, "removed"),
            Self::Added => write!(f, "added"),
            Self::Modified => write!(f, "modified"),
        }
    }
}

/// A single reported change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    pub path: ChangePath,
    pub kind: ChangeKind,
}

/// Ordered, duplicate-free list of changes between two snapshots.
///
/// Order is the older snapshot's key order, followed by keys only present
/// in the newer snapshot. Nothing is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, path: ChangePath, kind: ChangeKind) {
        self.changes.push(Change { path, kind });
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.changes.iter()
    }

    /// Reported paths, in report order.
    pub fn paths(&self) -> impl Iterator<Item = &ChangePath> {
        self.changes.iter().map(|c| &c.path)
    }

    /// Reported paths as plain strings, mostly for assertions.
    pub fn path_strings(&self) -> Vec<String> {
        self.paths().map(ToString::to_string).collect()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
