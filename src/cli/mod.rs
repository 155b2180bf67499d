//! CLI command handlers.
//!
//! Each handler implements one subcommand and is invoked by `main.rs`.
//! Output-producing parts take a writer so they can be tested directly.

mod diff;
mod probe;
mod watch;

pub use diff::{diff_files, run_diff, DiffOptions, CHANGES_DETECTED};
pub use probe::{probe_hosts, run_probe};
pub use watch::run_watch;
