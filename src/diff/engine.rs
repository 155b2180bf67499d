//! Structural comparison of two snapshots.

use super::result::{ChangeKind, ChangeSet};
use super::veto::VetoRuleSet;
use crate::model::{ChangePath, Snapshot};
use indexmap::IndexMap;

/// Recursive tree-diff over snapshots, filtered through a [`VetoRuleSet`].
///
/// Veto rules gate leaf and list comparisons only. Nested maps are always
/// descended into, removed keys are reported whatever their kind, and keys
/// that only exist in the newer snapshot are reported without consulting
/// the rules at all.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    veto: VetoRuleSet,
}

impl DiffEngine {
    /// Create a diff engine with the built-in veto rules
    pub fn new() -> Self {
        Self {
            veto: VetoRuleSet::standard(),
        }
    }

    /// Replace the veto rule set
    #[must_use]
    pub fn with_veto_rules(mut self, veto: VetoRuleSet) -> Self {
        self.veto = veto;
        self
    }

    pub fn veto_rules(&self) -> &VetoRuleSet {
        &self.veto
    }

    /// Compare an older snapshot against a newer one from the root.
    pub fn compare(&self, old: &Snapshot, new: &Snapshot) -> ChangeSet {
        self.compare_at(&ChangePath::root(), old, new)
    }

    /// Compare two nodes found at `prefix`.
    ///
    /// Vendor payload roots are always maps; any other pairing is reported
    /// as a single modification at `prefix` when the nodes differ.
    pub fn compare_at(&self, prefix: &ChangePath, old: &Snapshot, new: &Snapshot) -> ChangeSet {
        let mut changes = ChangeSet::new();
        match (old, new) {
            (Snapshot::Map(a), Snapshot::Map(b)) => self.compare_maps(prefix, a, b, &mut changes),
            _ if old != new => changes.push(prefix.clone(), ChangeKind::Modified),
            _ => {}
        }
        changes
    }

    fn compare_maps(
        &self,
        prefix: &ChangePath,
        old: &IndexMap<String, Snapshot>,
        new: &IndexMap<String, Snapshot>,
        changes: &mut ChangeSet,
    ) {
        for (key, old_value) in old {
            let path = prefix.child(key);

            let Some(new_value) = new.get(key) else {
                changes.push(path, ChangeKind::Removed);
                continue;
            };

            if let Snapshot::Map(old_map) = old_value {
                match new_value {
                    Snapshot::Map(new_map) => self.compare_maps(&path, old_map, new_map, changes),
                    _ => changes.push(path, ChangeKind::Modified),
                }
                continue;
            }

            if self.veto.is_vetoed(&path) {
                continue;
            }

            let changed = match (old_value, new_value) {
                (Snapshot::List(a), Snapshot::List(b)) => !same_elements(a, b),
                _ => old_value != new_value,
            };
            if changed {
                changes.push(path, ChangeKind::Modified);
            }
        }

        for key in new.keys() {
            if !old.contains_key(key) {
                changes.push(prefix.child(key), ChangeKind::Added);
            }
        }
    }
}

/// Set equality: the symmetric difference of the two lists is empty.
///
/// Order and multiplicity are ignored.
fn same_elements(a: &[Snapshot], b: &[Snapshot]) -> bool {
    a.iter().all(|x| b.contains(x)) && b.iter().all(|y| a.contains(y))
}
