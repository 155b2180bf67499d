//! CLI handler for the `probe` subcommand.

use super::watch::build_transport;
use crate::config::PollingConfig;
use crate::error::LedLogError;
use crate::probe::{display_id, resolve_vendor, Transport};
use anyhow::Result;
use std::io::Write;

/// Run vendor detection on each host and print what was found.
///
/// Returns exit code 1 if any host could not be identified.
pub fn run_probe(hosts: &[String], polling: &PollingConfig) -> Result<i32> {
    let transport = build_transport(polling)?;
    let failures = probe_hosts(&transport, hosts, &mut std::io::stdout().lock())?;
    Ok(i32::from(failures > 0))
}

/// Probe `hosts` in order, writing one line per host. Returns the failure count.
pub fn probe_hosts(
    transport: &dyn Transport,
    hosts: &[String],
    out: &mut dyn Write,
) -> Result<usize> {
    let mut failures = 0;
    for host in hosts {
        match resolve_vendor(transport, host) {
            Ok(resolved) => writeln!(
                out,
                "{host}: {} at {} as \"{}\"",
                resolved.vendor,
                resolved.url,
                display_id(resolved.vendor, host)
            )?,
            Err(LedLogError::ProbeFailure { source, .. }) => {
                failures += 1;
                writeln!(out, "{host}: not identified ({source})")?;
            }
            Err(other) => return Err(other.into()),
        }
    }
    Ok(failures)
}
