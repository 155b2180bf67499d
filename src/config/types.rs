//! Configuration types for led-volume-logger.
//!
//! Every section deserializes with defaults, so a config file only needs
//! the keys it wants to change.

use super::defaults::{
    DEFAULT_BACKUP_COUNT, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE, DEFAULT_MAX_BYTES,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::model::DEFAULT_MAX_SAMPLES;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Top-level configuration, loaded from a YAML file and layered with CLI flags.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Processor host addresses to monitor
    pub hosts: Vec<String>,
    /// Poll cadence and sampling
    pub polling: PollingConfig,
    /// Where and how change lines are written
    pub change_log: ChangeLogConfig,
    /// Operational log verbosity
    pub logging: LoggingConfig,
    /// Additional suppression rules
    pub veto: VetoConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Polling
// ============================================================================

/// Poll loop settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct PollingConfig {
    /// Seconds between poll cycles (fractional values allowed)
    pub interval_secs: f64,
    /// Samples retained per processor (2 to 1000)
    pub max_samples: usize,
    /// Sample all processors concurrently before comparing
    pub parallel: bool,
    /// Per-request HTTP timeout in seconds; omit for no timeout
    pub request_timeout_secs: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            max_samples: DEFAULT_MAX_SAMPLES,
            parallel: false,
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

// ============================================================================
// Change log
// ============================================================================

/// On-disk encoding of the change log.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeLogFormat {
    /// `<timestamp> <processor>:<path>: <old> -> <new>`
    #[default]
    Text,
    /// One JSON object per line
    Ndjson,
}

impl std::fmt::Display for ChangeLogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Ndjson => write!(f, "ndjson"),
        }
    }
}

/// Change log sink settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChangeLogConfig {
    /// Log file path; `-` writes to stdout without rotation
    pub path: PathBuf,
    /// Size in bytes at which the file is rotated
    pub max_bytes: u64,
    /// Number of rotated files kept (`file.1` is the newest)
    pub backup_count: usize,
    /// Line encoding
    pub format: ChangeLogFormat,
}

impl Default for ChangeLogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            max_bytes: DEFAULT_MAX_BYTES,
            backup_count: DEFAULT_BACKUP_COUNT,
            format: ChangeLogFormat::Text,
        }
    }
}

impl ChangeLogConfig {
    /// Whether change lines go to stdout instead of a file.
    pub fn is_stdout(&self) -> bool {
        self.path.as_os_str() == "-"
    }
}

// ============================================================================
// Logging
// ============================================================================

/// Operational log verbosity.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    /// Resolve the `-q`/`-v`/`-d` flags; debug beats verbose beats quiet.
    pub fn from_flags(quiet: bool, verbose: bool, debug: bool) -> Option<Self> {
        if debug {
            Some(Self::Debug)
        } else if verbose {
            Some(Self::Info)
        } else if quiet {
            Some(Self::Error)
        } else {
            None
        }
    }
}

/// Operational log settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no verbosity flag is given
    pub level: LogLevel,
}

// ============================================================================
// Veto
// ============================================================================

/// User-supplied suppression patterns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VetoConfig {
    /// Regexes matched against dotted change paths, added to the built-in rules
    pub extra_patterns: Vec<String>,
}

// ============================================================================
// CLI overrides
// ============================================================================

/// Values given on the command line, layered over the file config.
///
/// `None` and `false` leave the file value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub hosts: Vec<String>,
    pub interval_secs: Option<f64>,
    pub max_samples: Option<usize>,
    pub parallel: bool,
    pub request_timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub format: Option<ChangeLogFormat>,
    pub level: Option<LogLevel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert!(config.hosts.is_empty());
        assert_eq!(config.polling.interval_secs, 30.0);
        assert_eq!(config.polling.max_samples, 3);
        assert_eq!(config.polling.request_timeout_secs, Some(30));
        assert_eq!(config.change_log.path, PathBuf::from("/var/log/led-volume.log"));
        assert_eq!(config.change_log.max_bytes, 10 * 1024);
        assert_eq!(config.change_log.backup_count, 99);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn test_log_level_from_flags_precedence() {
        assert_eq!(LogLevel::from_flags(false, false, false), None);
        assert_eq!(LogLevel::from_flags(true, false, false), Some(LogLevel::Error));
        assert_eq!(LogLevel::from_flags(true, true, false), Some(LogLevel::Info));
        assert_eq!(LogLevel::from_flags(true, true, true), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_flags(false, false, true), Some(LogLevel::Debug));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "hosts: [10.0.0.0]\npolling:\n  interval_secs: 2.5\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.hosts, vec!["10.0.0.0"]);
        assert_eq!(config.polling.interval_secs, 2.5);
        assert_eq!(config.polling.max_samples, 3);
        assert_eq!(config.change_log.format, ChangeLogFormat::Text);
    }

    #[test]
    fn test_format_parses_lowercase() {
        let config: ChangeLogConfig = serde_yaml::from_str("format: ndjson").unwrap();
        assert_eq!(config.format, ChangeLogFormat::Ndjson);
    }

    #[test]
    fn test_stdout_path() {
        let config = ChangeLogConfig {
            path: PathBuf::from("-"),
            ..Default::default()
        };
        assert!(config.is_stdout());
        assert!(!ChangeLogConfig::default().is_stdout());
    }
}
