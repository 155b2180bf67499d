//! Structural change detection between telemetry snapshots.
//!
//! # Architecture
//!
//! - [`DiffEngine`]: recursive map-vs-map comparison producing a [`ChangeSet`]
//! - [`VetoRuleSet`]: path patterns whose leaf and list changes are suppressed
//! - [`resolve`]: dotted-path lookup used to render old/new values
//!
//! # Example
//!
//! ```
//! use led_volume_logger::diff::DiffEngine;
//! use led_volume_logger::model::Snapshot;
//!
//! let old = Snapshot::from_json_str(r#"{"sys":{"temps":{"fan1":30}},"name":"X"}"#).unwrap();
//! let new = Snapshot::from_json_str(r#"{"sys":{"temps":{"fan1":45}},"name":"Y"}"#).unwrap();
//!
//! let changes = DiffEngine::new().compare(&old, &new);
//! assert_eq!(changes.path_strings(), vec!["name"]);
//! ```

mod engine;
mod resolve;
mod result;
pub mod veto;

pub use engine::DiffEngine;
pub use resolve::resolve;
pub use result::{Change, ChangeKind, ChangeSet};
pub use veto::{VetoRule, VetoRuleSet, BUILTIN_VETO_PATTERNS};
