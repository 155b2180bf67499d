//! CLI handler for the `watch` subcommand.

use crate::config::{AppConfig, PollingConfig};
use crate::error::LedLogError;
use crate::probe::{HttpTransport, HttpTransportConfig};
use crate::report::build_reporter;
use crate::watch::{run_watch_loop, WatchConfig, WatchSummary};
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Run the poll loop with a merged configuration.
///
/// Returns when interrupted or after `max_cycles` cycles.
pub fn run_watch(config: &AppConfig, max_cycles: Option<u64>) -> Result<WatchSummary> {
    config.ensure_valid_for_watch()?;

    let watch_config = WatchConfig::from_app_config(config)
        .map_err(|e| LedLogError::config(e.to_string()))?
        .with_max_cycles(max_cycles);
    let transport = build_transport(&config.polling)?;
    let mut reporter = build_reporter(&config.change_log)?;
    let stop = install_stop_flag();

    run_watch_loop(&watch_config, &transport, reporter.as_mut(), &stop)
}

/// Blocking HTTP transport honoring the configured request timeout.
pub(crate) fn build_transport(polling: &PollingConfig) -> Result<HttpTransport> {
    let config = HttpTransportConfig {
        timeout: polling.request_timeout_secs.map(Duration::from_secs),
    };
    HttpTransport::new(&config).context("failed to build HTTP client")
}

/// Flag set by Ctrl-C.
fn install_stop_flag() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = Arc::clone(&stop);
    if let Err(e) = ctrlc::set_handler(move || {
        stop_flag.store(true, Ordering::Relaxed);
    }) {
        // Non-fatal: the loop still ends on --cycles or process kill.
        tracing::warn!("Could not install interrupt handler: {e}");
    }
    stop
}
