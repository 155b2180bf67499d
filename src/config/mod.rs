//! Configuration for led-volume-logger.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! a discovered YAML file, and command-line flags.
//!
//! # Configuration File
//!
//! Place a `led-volume-logger.yaml` file in the working directory or in
//! `~/.config/led-volume-logger/`:
//!
//! ```yaml
//! hosts: [10.0.0.0, 10.0.0.1]
//! polling:
//!   interval_secs: 15
//! change_log:
//!   path: /var/log/led-volume.log
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DATE_FORMAT, DEFAULT_BACKUP_COUNT, DEFAULT_INTERVAL_SECS, DEFAULT_LOG_FILE, DEFAULT_MAX_BYTES,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use types::{
    AppConfig, ChangeLogConfig, ChangeLogFormat, ConfigOverrides, LogLevel, LoggingConfig,
    PollingConfig, VetoConfig,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, load_config_file, load_or_default,
    ConfigFileError,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// Editors can use it to validate and complete config files.
#[must_use]
pub fn generate_json_schema() -> String {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema).unwrap_or_default()
}
