//! Dotted addresses into a snapshot tree.

use serde::{Serialize, Serializer};
use std::fmt;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Dotted address of a field inside a [`Snapshot`](super::Snapshot),
/// e.g. `system.temps.fan1`.
///
/// [`ChangePath::child`] is the only place segments are joined, so every
/// change, whatever node kind produced it, is formatted the same way.
///
/// The raw keys are kept next to the joined form. A key that itself
/// contains `.` renders ambiguously, but lookups walk the stored keys and
/// never re-split the string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangePath {
    joined: String,
    keys: Vec<String>,
}

impl ChangePath {
    /// The empty path addressing the snapshot root.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse an already dotted string, one key per separator.
    pub fn new(dotted: impl Into<String>) -> Self {
        let joined = dotted.into();
        let keys = if joined.is_empty() {
            Vec::new()
        } else {
            joined.split(PATH_SEPARATOR).map(str::to_string).collect()
        };
        Self { joined, keys }
    }

    /// Extend this path by one key.
    #[must_use]
    pub fn child(&self, key: &str) -> Self {
        let mut joined = String::with_capacity(self.joined.len() + 1 + key.len());
        if !self.keys.is_empty() {
            joined.push_str(&self.joined);
            joined.push(PATH_SEPARATOR);
        }
        joined.push_str(key);

        let mut keys = Vec::with_capacity(self.keys.len() + 1);
        keys.extend(self.keys.iter().cloned());
        keys.push(key.to_string());
        Self { joined, keys }
    }

    pub fn is_root(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.joined
    }

    /// Keys from the root down. The root path has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

impl fmt::Display for ChangePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined)
    }
}

impl From<&str> for ChangePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for ChangePath {
    fn as_ref(&self) -> &str {
        &self.joined
    }
}

impl Serialize for ChangePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.joined)
    }
}
