//! A monitored processor and its sampling history.

use super::transport::Transport;
use super::vendor::{display_id, resolve_vendor, ResolvedVendor, Vendor};
use crate::diff::{resolve, ChangeSet, DiffEngine};
use crate::error::{FailureCause, LedLogError, Result};
use crate::model::{Sample, SampleWindow, Snapshot, DEFAULT_MAX_SAMPLES};
use crate::report::ChangeRecord;
use chrono::Utc;
use std::fmt;

/// One physical processor, identified once and then polled for the
/// lifetime of the session.
#[derive(Debug)]
pub struct Endpoint {
    address: String,
    vendor: Vendor,
    url: String,
    display_id: String,
    history: SampleWindow,
}

/// What happened to one poll of an endpoint.
#[derive(Debug)]
pub enum SampleOutcome {
    /// A snapshot was appended to the history.
    Recorded,
    /// The poll failed; history is unchanged.
    Skipped(FailureCause),
}

impl SampleOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded)
    }
}

impl Endpoint {
    /// Detect the vendor behind `address` and build an endpoint for it.
    ///
    /// Fails with [`crate::LedLogError::ProbeFailure`] when no vendor API
    /// answers; the caller is expected to drop the host for the session.
    pub fn connect(address: &str, transport: &dyn Transport, max_samples: usize) -> Result<Self> {
        let resolved = resolve_vendor(transport, address)?;
        let endpoint = Self::from_resolved(address, resolved, max_samples);
        tracing::info!("Initialized {endpoint}");
        Ok(endpoint)
    }

    /// Build an endpoint whose vendor is already known.
    pub fn from_resolved(address: &str, resolved: ResolvedVendor, max_samples: usize) -> Self {
        Self {
            address: address.to_string(),
            vendor: resolved.vendor,
            url: resolved.url,
            display_id: display_id(resolved.vendor, address),
            history: SampleWindow::with_capacity(max_samples),
        }
    }

    /// Shorthand for [`Endpoint::from_resolved`] with the default window.
    pub fn with_vendor(address: &str, vendor: Vendor) -> Self {
        let resolved = ResolvedVendor {
            vendor,
            url: vendor.data_url(address),
        };
        Self::from_resolved(address, resolved, DEFAULT_MAX_SAMPLES)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    pub fn history(&self) -> &SampleWindow {
        &self.history
    }

    /// Poll the processor once.
    ///
    /// Failures never propagate: they are logged at warning level and the
    /// history is left as it was.
    pub fn sample(&mut self, transport: &dyn Transport) -> SampleOutcome {
        let taken_at = Utc::now();
        let fetched = transport
            .get(&self.url, &[])
            .map_err(FailureCause::from)
            .and_then(|response| response.into_snapshot());

        match fetched {
            Ok((snapshot, body)) => {
                self.history.append(Sample::new(taken_at, snapshot, &body));
                tracing::debug!("{self} appended data sample");
                SampleOutcome::Recorded
            }
            Err(cause) => {
                match &cause {
                    FailureCause::Status(code) => {
                        tracing::warn!("Error {code} loading data from {self}");
                    }
                    other => {
                        tracing::warn!("{}", LedLogError::sample(self.to_string(), other.clone()));
                    }
                }
                SampleOutcome::Skipped(cause)
            }
        }
    }

    /// Diff the two most recent samples.
    ///
    /// Returns `None` until two samples have been recorded.
    pub fn compare(&self, engine: &DiffEngine) -> Option<Comparison<'_>> {
        let (older, newer) = self.history.latest_pair()?;
        tracing::debug!(
            "{self} comparing sample from {} to {}",
            older.taken_at.to_rfc3339(),
            newer.taken_at.to_rfc3339()
        );

        let changes = if older.same_payload(newer) {
            ChangeSet::new()
        } else {
            engine.compare(&older.snapshot, &newer.snapshot)
        };

        Some(Comparison {
            endpoint: &self.display_id,
            older: &older.snapshot,
            newer: &newer.snapshot,
            changes,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.display_id)
    }
}

/// Changes between two retained samples of one endpoint.
///
/// Borrows the snapshots from the endpoint's history so old and new values
/// can be rendered without copying either tree.
#[derive(Debug)]
pub struct Comparison<'a> {
    endpoint: &'a str,
    older: &'a Snapshot,
    newer: &'a Snapshot,
    changes: ChangeSet,
}

impl<'a> Comparison<'a> {
    /// Compare two free-standing snapshots under an arbitrary label.
    pub fn between(
        endpoint: &'a str,
        older: &'a Snapshot,
        newer: &'a Snapshot,
        engine: &DiffEngine,
    ) -> Self {
        Self {
            endpoint,
            older,
            newer,
            changes: engine.compare(older, newer),
        }
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// One record per changed path, with both sides resolved for display.
    pub fn records(&self) -> impl Iterator<Item = ChangeRecord<'_>> {
        self.changes.iter().map(move |change| ChangeRecord {
            endpoint: self.endpoint,
            path: &change.path,
            kind: change.kind,
            old: resolve(self.older, &change.path),
            new: resolve(self.newer, &change.path),
        })
    }
}
