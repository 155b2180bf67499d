//! Watch state management.
//!
//! Holds the live endpoints of a session together with the counters that
//! end up in the session summary.

use crate::probe::Endpoint;
use serde::Serialize;
use std::time::Instant;

/// Top-level state for an active watch session.
#[derive(Debug)]
pub struct WatchState {
    /// Endpoints that passed vendor detection, in input order.
    pub endpoints: Vec<Endpoint>,
    /// Hosts dropped at startup.
    pub excluded: Vec<String>,
    /// When the watch session started.
    pub started_at: Instant,
    /// Completed poll cycles.
    pub poll_count: u64,
    /// Change records handed to the reporter.
    pub total_changes: u64,
    /// Samples that failed and were skipped.
    pub failed_samples: u64,
    /// Timestamp of the most recent cycle.
    pub last_poll: Option<Instant>,
}

impl WatchState {
    pub fn new(endpoints: Vec<Endpoint>, excluded: Vec<String>) -> Self {
        Self {
            endpoints,
            excluded,
            started_at: Instant::now(),
            poll_count: 0,
            total_changes: 0,
            failed_samples: 0,
            last_poll: None,
        }
    }

    /// Whether the session has reached its cycle limit.
    pub fn reached(&self, max_cycles: Option<u64>) -> bool {
        max_cycles.map_or(false, |max| self.poll_count >= max)
    }

    pub fn summary(&self) -> WatchSummary {
        WatchSummary {
            endpoint_count: self.endpoints.len(),
            excluded_count: self.excluded.len(),
            cycles: self.poll_count,
            total_changes: self.total_changes,
            failed_samples: self.failed_samples,
            uptime_secs: self.started_at.elapsed().as_secs(),
        }
    }
}

/// Summary of a watch session, returned when the loop ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchSummary {
    pub endpoint_count: usize,
    pub excluded_count: usize,
    pub cycles: u64,
    pub total_changes: u64,
    pub failed_samples: u64,
    pub uptime_secs: u64,
}

impl std::fmt::Display for WatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} processor(s), {} ignored | {} cycle(s) | {} change(s) | {} failed sample(s) | uptime {}s",
            self.endpoint_count,
            self.excluded_count,
            self.cycles,
            self.total_changes,
            self.failed_samples,
            self.uptime_secs,
        )
    }
}
