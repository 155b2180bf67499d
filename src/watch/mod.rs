//! Continuous polling of LED processors.
//!
//! Each cycle samples every live endpoint, compares its two most recent
//! snapshots and hands the resulting change records to a
//! [`crate::report::ChangeReporter`]. Hosts that fail vendor detection at
//! startup are dropped for the whole session.

mod config;
mod loop_impl;
mod state;

pub use config::{parse_duration, WatchConfig};
pub use loop_impl::{connect_endpoints, run_cycle, run_watch_loop, STOP_POLL_SLICE};
pub use state::{WatchState, WatchSummary};

/// Errors specific to the watch subsystem.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WatchError {
    #[error("invalid interval '{0}': expected seconds or a duration like 500ms, 30s, 5m, 1h")]
    InvalidInterval(String),

    #[error("invalid veto pattern: {0}")]
    InvalidVeto(String),

    #[error("no processor hosts given")]
    NoHosts,
}
