//! Watch configuration and duration parsing.

use super::WatchError;
use crate::config::{AppConfig, DEFAULT_INTERVAL_SECS};
use crate::diff::VetoRuleSet;
use crate::model::DEFAULT_MAX_SAMPLES;
use std::time::Duration;

/// Resolved settings for one polling session.
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Processor addresses, in input order
    pub hosts: Vec<String>,
    /// Sleep between the end of one cycle and the start of the next
    pub poll_interval: Duration,
    /// Samples retained per endpoint
    pub max_samples: usize,
    /// Sample all endpoints concurrently before comparing
    pub parallel: bool,
    /// Suppression rules applied to every comparison
    pub veto: VetoRuleSet,
    /// Stop after this many cycles; `None` runs until interrupted
    pub max_cycles: Option<u64>,
}

impl WatchConfig {
    /// Defaults for `hosts`, with the built-in veto rules.
    pub fn new(hosts: Vec<String>) -> Self {
        Self {
            hosts,
            poll_interval: Duration::from_secs_f64(DEFAULT_INTERVAL_SECS),
            max_samples: DEFAULT_MAX_SAMPLES,
            parallel: false,
            veto: VetoRuleSet::standard(),
            max_cycles: None,
        }
    }

    /// Build from a merged application config.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, WatchError> {
        let poll_interval = secs_to_duration(config.polling.interval_secs)
            .ok_or_else(|| WatchError::InvalidInterval(config.polling.interval_secs.to_string()))?;
        let veto = VetoRuleSet::standard()
            .with_extra_patterns(&config.veto.extra_patterns)
            .map_err(WatchError::InvalidVeto)?;

        Ok(Self {
            hosts: config.hosts.clone(),
            poll_interval,
            max_samples: config.polling.max_samples,
            parallel: config.polling.parallel,
            veto,
            max_cycles: None,
        })
    }

    #[must_use]
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Parse a human-readable duration string into a [`Duration`].
///
/// Supported suffixes: `ms` (milliseconds), `s` (seconds), `m` (minutes),
/// `h` (hours), `d` (days). A bare number is seconds and may be
/// fractional.
///
/// # Examples
///
/// ```
/// use led_volume_logger::watch::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
/// assert_eq!(parse_duration("2.5").unwrap(), Duration::from_millis(2500));
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, WatchError> {
    let s = s.trim();
    let invalid = || WatchError::InvalidInterval(s.to_string());
    if s.is_empty() {
        return Err(invalid());
    }

    let (num_str, to_secs): (&str, fn(f64) -> f64) = if let Some(n) = s.strip_suffix("ms") {
        (n, |v| v / 1000.0)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, |v| v)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, |v| v * 60.0)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, |v| v * 3600.0)
    } else if let Some(n) = s.strip_suffix('d') {
        (n, |v| v * 86_400.0)
    } else {
        (s, |v| v)
    };

    let value: f64 = num_str.trim().parse().map_err(|_| invalid())?;
    secs_to_duration(to_secs(value)).ok_or_else(invalid)
}

/// Positive, finite seconds as a [`Duration`].
fn secs_to_duration(secs: f64) -> Option<Duration> {
    if secs.is_finite() && secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}
