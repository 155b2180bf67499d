//! Main watch loop orchestrator.
//!
//! Coordinates vendor detection, sampling, diffing and change reporting.

use super::config::WatchConfig;
use super::state::{WatchState, WatchSummary};
use super::WatchError;
use crate::diff::DiffEngine;
use crate::error::LedLogError;
use crate::probe::{Endpoint, SampleOutcome, Transport};
use crate::report::ChangeReporter;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Longest stretch the loop sleeps without checking the stop flag.
pub const STOP_POLL_SLICE: Duration = Duration::from_millis(250);

/// Run the main watch loop.
///
/// Identifies every host, then polls the survivors every
/// `config.poll_interval` until `stop` is set or `config.max_cycles` is
/// reached. Session markers bracket the run in the change log.
pub fn run_watch_loop(
    config: &WatchConfig,
    transport: &dyn Transport,
    reporter: &mut dyn ChangeReporter,
    stop: &AtomicBool,
) -> anyhow::Result<WatchSummary> {
    if config.hosts.is_empty() {
        return Err(WatchError::NoHosts.into());
    }

    let engine = DiffEngine::new().with_veto_rules(config.veto.clone());

    tracing::debug!("Initializing processor objects");
    let (endpoints, excluded) = connect_endpoints(&config.hosts, transport, config.max_samples);
    let mut state = WatchState::new(endpoints, excluded);

    if let Err(e) = reporter.on_session_start() {
        tracing::warn!("Change reporter error: {e}");
    }

    while !stop.load(Ordering::Relaxed) && !state.reached(config.max_cycles) {
        run_cycle(&mut state, &engine, transport, reporter, config.parallel);

        if state.reached(config.max_cycles) || stop.load(Ordering::Relaxed) {
            break;
        }
        tracing::debug!("Sleeping {:.1}s", config.poll_interval.as_secs_f64());
        sleep_until_next_cycle(config.poll_interval, stop);
    }

    if let Err(e) = reporter.on_session_end() {
        tracing::warn!("Change reporter error: {e}");
    }

    let summary = state.summary();
    tracing::info!("Watch finished: {summary}");
    Ok(summary)
}

/// Run vendor detection for every host.
///
/// Returns the endpoints that were identified, in input order, and the
/// hosts that were dropped. Dropped hosts are never retried.
pub fn connect_endpoints(
    hosts: &[String],
    transport: &dyn Transport,
    max_samples: usize,
) -> (Vec<Endpoint>, Vec<String>) {
    let mut endpoints = Vec::with_capacity(hosts.len());
    let mut excluded = Vec::new();

    for host in hosts {
        match Endpoint::connect(host, transport, max_samples) {
            Ok(endpoint) => endpoints.push(endpoint),
            Err(err) => {
                let cause = match &err {
                    LedLogError::ProbeFailure { source, .. } => source.to_string(),
                    other => other.to_string(),
                };
                tracing::warn!("Ignoring {host} due to {cause}");
                excluded.push(host.clone());
            }
        }
    }

    if !excluded.is_empty() {
        tracing::error!(
            "{} host(s) will be ignored for this session.",
            excluded.len()
        );
    }

    (endpoints, excluded)
}

/// One poll cycle: sample every endpoint and report what changed.
///
/// In parallel mode all endpoints are sampled concurrently and compared
/// afterwards, still in input order. An endpoint is only compared after a
/// successful sample, so a failed poll never repeats the previous report.
/// Returns the number of change records emitted.
pub fn run_cycle(
    state: &mut WatchState,
    engine: &DiffEngine,
    transport: &dyn Transport,
    reporter: &mut dyn ChangeReporter,
    parallel: bool,
) -> u64 {
    let mut reported = 0;

    if parallel {
        let outcomes: Vec<SampleOutcome> = state
            .endpoints
            .par_iter_mut()
            .map(|endpoint| endpoint.sample(transport))
            .collect();

        for (endpoint, outcome) in state.endpoints.iter().zip(&outcomes) {
            if outcome.is_recorded() {
                reported += report_changes(endpoint, engine, reporter);
            } else {
                state.failed_samples += 1;
            }
        }
    } else {
        for endpoint in &mut state.endpoints {
            if endpoint.sample(transport).is_recorded() {
                reported += report_changes(endpoint, engine, reporter);
            } else {
                state.failed_samples += 1;
            }
        }
    }

    state.total_changes += reported;
    state.poll_count += 1;
    state.last_poll = Some(Instant::now());
    reported
}

fn report_changes(endpoint: &Endpoint, engine: &DiffEngine, reporter: &mut dyn ChangeReporter) -> u64 {
    let Some(comparison) = endpoint.compare(engine) else {
        return 0;
    };

    let mut count = 0;
    for record in comparison.records() {
        if let Err(e) = reporter.on_change(&record) {
            tracing::warn!("Change reporter error: {e}");
        }
        count += 1;
    }
    count
}

/// Sleep for `interval`, waking early once `stop` is set.
fn sleep_until_next_cycle(interval: Duration, stop: &AtomicBool) {
    // An interval past the clock's range has no deadline; only `stop` ends it.
    let deadline = Instant::now().checked_add(interval);
    loop {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        let remaining = match deadline {
            Some(deadline) => {
                let now = Instant::now();
                if now >= deadline {
                    return;
                }
                deadline - now
            }
            None => STOP_POLL_SLICE,
        };
        std::thread::sleep(remaining.min(STOP_POLL_SLICE));
    }
}
