//! Default values shared by the config types and the CLI help text.

/// Seconds between poll cycles.
pub const DEFAULT_INTERVAL_SECS: f64 = 30.0;

/// Change log location on a stock install.
pub const DEFAULT_LOG_FILE: &str = "/var/log/led-volume.log";

/// Change log size at which it is rotated (10 KiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024;

/// Rotated change log files kept next to the live one.
pub const DEFAULT_BACKUP_COUNT: usize = 99;

/// Per-request HTTP timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Timestamp layout used by both log streams.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
