//! Dotted-path value lookup, used when rendering change reports.

use crate::model::{ChangePath, Snapshot};

/// Walk `path` through nested maps of `snapshot`.
///
/// A missing segment is logged and yields `None`. Only used to render the
/// old and new sides of a change line, never for control flow.
pub fn resolve<'a>(snapshot: &'a Snapshot, path: &ChangePath) -> Option<&'a Snapshot> {
    let mut cursor = snapshot;
    for segment in path.segments() {
        match cursor.get(segment) {
            Some(next) => cursor = next,
            None => {
                tracing::warn!("Missing key {segment:?} while resolving {path}");
                return None;
            }
        }
    }
    Some(cursor)
}
