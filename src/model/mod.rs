//! Data model for processor telemetry.
//!
//! Vendor payloads are heterogeneous JSON; they are normalized into the
//! [`Snapshot`] tree so traversal is exhaustive over node kinds. Fields
//! inside a tree are addressed by [`ChangePath`], and each endpoint keeps
//! its recent snapshots in a [`SampleWindow`].

mod path;
mod snapshot;
mod window;

pub use path::{ChangePath, PATH_SEPARATOR};
pub use snapshot::{Scalar, Snapshot};
pub use window::{Sample, SampleWindow, DEFAULT_MAX_SAMPLES, MAX_MAX_SAMPLES, MIN_MAX_SAMPLES};
