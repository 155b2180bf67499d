//! Diff command handler.
//!
//! Compares two saved processor snapshots offline, with the same engine
//! and suppression rules the poll loop uses.

use crate::diff::{DiffEngine, VetoRuleSet};
use crate::model::Snapshot;
use crate::probe::Comparison;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Exit code when the snapshots differ.
pub const CHANGES_DETECTED: i32 = 1;

/// Options for an offline diff.
#[derive(Debug, Clone)]
pub struct DiffOptions {
    /// Label printed in place of a processor id
    pub label: String,
    /// Apply the built-in suppression rules
    pub builtin_veto: bool,
    /// Additional suppression patterns
    pub extra_patterns: Vec<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            label: "diff".to_string(),
            builtin_veto: true,
            extra_patterns: Vec::new(),
        }
    }
}

impl DiffOptions {
    fn veto_rules(&self) -> Result<VetoRuleSet> {
        let base = if self.builtin_veto {
            VetoRuleSet::standard()
        } else {
            VetoRuleSet::empty()
        };
        base.with_extra_patterns(&self.extra_patterns)
            .map_err(anyhow::Error::msg)
    }
}

/// Run the diff command, returning the desired exit code.
pub fn run_diff(old: &Path, new: &Path, options: &DiffOptions) -> Result<i32> {
    let changes = diff_files(old, new, options, &mut std::io::stdout().lock())?;
    tracing::info!("{changes} change(s) between {} and {}", old.display(), new.display());
    Ok(if changes > 0 { CHANGES_DETECTED } else { 0 })
}

/// Diff two snapshot files, writing one change line per path to `out`.
pub fn diff_files(
    old: &Path,
    new: &Path,
    options: &DiffOptions,
    out: &mut dyn Write,
) -> Result<usize> {
    let old_snapshot = load_snapshot(old)?;
    let new_snapshot = load_snapshot(new)?;
    let engine = DiffEngine::new().with_veto_rules(options.veto_rules()?);

    let comparison = Comparison::between(&options.label, &old_snapshot, &new_snapshot, &engine);
    for record in comparison.records() {
        writeln!(out, "{}", record.line())?;
    }
    Ok(comparison.changes().len())
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let body = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Snapshot::from_slice(&body).with_context(|| format!("{} is not valid JSON", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_diff_files_prints_lines() {
        let tmp = TempDir::new().unwrap();
        let old = write(&tmp, "a.json", r#"{"sys":{"temps":{"fan1":30}},"name":"X"}"#);
        let new = write(&tmp, "b.json", r#"{"sys":{"temps":{"fan1":45}},"name":"Y"}"#);

        let mut out = Vec::new();
        let count = diff_files(&old, &new, &DiffOptions::default(), &mut out).unwrap();
        assert_eq!(count, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "diff:name: X -> Y\n");
    }

    #[test]
    fn test_diff_without_builtin_veto() {
        let tmp = TempDir::new().unwrap();
        let old = write(&tmp, "a.json", r#"{"sys":{"temps":{"fan1":30}}}"#);
        let new = write(&tmp, "b.json", r#"{"sys":{"temps":{"fan1":45}}}"#);
        let options = DiffOptions {
            label: "lab".to_string(),
            builtin_veto: false,
            extra_patterns: Vec::new(),
        };

        let mut out = Vec::new();
        diff_files(&old, &new, &options, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "lab:sys.temps.fan1: 30 -> 45\n");
    }

    #[test]
    fn test_diff_rejects_invalid_json() {
        let tmp = TempDir::new().unwrap();
        let old = write(&tmp, "a.json", "{}");
        let new = write(&tmp, "b.json", "{");
        let err = diff_files(&old, &new, &DiffOptions::default(), &mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("b.json"), "{err}");
    }

    #[test]
    fn test_diff_bad_extra_pattern() {
        let tmp = TempDir::new().unwrap();
        let old = write(&tmp, "a.json", "{}");
        let options = DiffOptions {
            extra_patterns: vec!["(".to_string()],
            ..Default::default()
        };
        assert!(diff_files(&old, &old, &options, &mut Vec::new()).is_err());
    }
}
