//! **Change logging for LED-wall video processors.**
//!
//! `led-volume-logger` polls the HTTP telemetry of Megapixel Helios and
//! Brompton Tessera processors and writes one line to a change log for
//! every field that differs between consecutive polls. Fields that are
//! known to be noisy (fan speeds, temperatures, uptime counters and the
//! like) are suppressed by a set of path-matching veto rules.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the [`Snapshot`] tree built from one JSON response, the
//!   dotted [`ChangePath`] that addresses a field inside it, and the bounded
//!   [`SampleWindow`] of recent snapshots per processor.
//! - **[`diff`]**: the [`DiffEngine`] that walks two snapshots and reports
//!   changed paths, filtered through a [`VetoRuleSet`].
//! - **[`probe`]**: vendor detection and the per-processor [`Endpoint`] that
//!   samples snapshots over a [`Transport`].
//! - **[`watch`]**: the poll loop tying the above together.
//! - **[`report`]**: change log sinks behind the [`ChangeReporter`] trait,
//!   including size-based file rotation.
//! - **[`config`]**: YAML configuration, discovery and validation.
//!
//! ## Comparing Two Snapshots
//!
//! ```
//! use led_volume_logger::{DiffEngine, Snapshot};
//!
//! let old = Snapshot::from_json_str(r#"{"sys": {"temps": {"fan1": 30}}, "name": "X"}"#).unwrap();
//! let new = Snapshot::from_json_str(r#"{"sys": {"temps": {"fan1": 45}}, "name": "Y"}"#).unwrap();
//!
//! // The temperature change is suppressed by the built-in veto rules.
//! let changes = DiffEngine::new().compare(&old, &new);
//! assert_eq!(changes.path_strings(), vec!["name"]);
//! ```
//!
//! ## Polling Processors
//!
//! ```no_run
//! use led_volume_logger::probe::{HttpTransport, HttpTransportConfig};
//! use led_volume_logger::report::TextReporter;
//! use led_volume_logger::watch::{run_watch_loop, WatchConfig};
//! use std::sync::atomic::AtomicBool;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = WatchConfig::new(vec!["10.0.0.0".into(), "10.0.0.1".into()]);
//!     let transport = HttpTransport::new(&HttpTransportConfig::default())?;
//!     let mut reporter = TextReporter::new(std::io::stdout());
//!     let stop = AtomicBool::new(false);
//!
//!     let summary = run_watch_loop(&config, &transport, &mut reporter, &stop)?;
//!     println!("{summary}");
//!     Ok(())
//! }
//! ```

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // `old`/`new` pairs are clear in context
    clippy::similar_names
)]

pub mod cli;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod probe;
pub mod report;
pub mod watch;

// Re-export main types for convenience
pub use config::{AppConfig, ChangeLogConfig, ConfigError, PollingConfig, Validatable};
pub use diff::{ChangeKind, ChangeSet, DiffEngine, VetoRule, VetoRuleSet};
pub use error::{ErrorContext, FailureCause, LedLogError, Result, TransportError};
pub use model::{ChangePath, Sample, SampleWindow, Snapshot};
pub use probe::{Endpoint, HttpTransport, Transport, Vendor};
pub use report::{ChangeRecord, ChangeReporter};
pub use watch::{run_watch_loop, WatchConfig, WatchSummary};
