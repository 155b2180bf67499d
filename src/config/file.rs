//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::{AppConfig, ConfigOverrides};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".led-volume-logger.yaml",
    ".led-volume-logger.yml",
    "led-volume-logger.yaml",
    "led-volume-logger.yml",
];

/// Directory under the user config dir that may hold a config file.
const CONFIG_DIR_NAME: &str = "led-volume-logger";

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (~/.config/led-volume-logger/)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    let search_dirs = [
        std::env::current_dir().ok(),
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)),
        dirs::home_dir(),
    ];

    search_dirs
        .iter()
        .flatten()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    // An empty file is a valid, all-default config.
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from the discovered file.
///
/// An explicit path that does not exist is an error; a missing discovered
/// file just means defaults.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        if !path.exists() {
            return Err(ConfigFileError::NotFound(path.to_path_buf()));
        }
    }

    match discover_config_file(explicit_path) {
        Some(path) => {
            let config = load_config_file(&path)?;
            tracing::debug!("Loaded config from {}", path.display());
            Ok((config, Some(path)))
        }
        None => Ok((AppConfig::default(), None)),
    }
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Layer command-line values over this config.
    ///
    /// CLI hosts are appended to file hosts; duplicates are dropped, keeping
    /// the first occurrence.
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        self.hosts.extend(overrides.hosts.iter().cloned());
        let mut seen = HashSet::with_capacity(self.hosts.len());
        self.hosts.retain(|host| seen.insert(host.clone()));

        if let Some(interval) = overrides.interval_secs {
            self.polling.interval_secs = interval;
        }
        if let Some(max_samples) = overrides.max_samples {
            self.polling.max_samples = max_samples;
        }
        if overrides.parallel {
            self.polling.parallel = true;
        }
        if overrides.request_timeout_secs.is_some() {
            self.polling.request_timeout_secs = overrides.request_timeout_secs;
        }

        if let Some(path) = &overrides.log_file {
            self.change_log.path.clone_from(path);
        }
        if let Some(format) = overrides.format {
            self.change_log.format = format;
        }

        if let Some(level) = overrides.level {
            self.logging.level = level;
        }
    }

    /// Load from file and merge with CLI overrides.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_example_config() -> String {
    r#"# LED volume logger configuration
# Place this file at ./led-volume-logger.yaml or
# ~/.config/led-volume-logger/led-volume-logger.yaml
#
# Command-line flags always override file settings.

# Processor addresses. Hosts given on the command line are added to these.
hosts: []
#  - 10.0.0.0
#  - 10.0.0.1

polling:
  # Seconds between poll cycles
  interval_secs: 30.0
  # Samples kept per processor (minimum 2)
  max_samples: 3
  # Sample every processor concurrently, then compare in order
  parallel: false
  # Per-request HTTP timeout; remove the key for no timeout
  request_timeout_secs: 30

change_log:
  # Use "-" to print change lines to stdout
  path: /var/log/led-volume.log
  max_bytes: 10240
  backup_count: 99
  # text or ndjson
  format: text

logging:
  # error, warn, info or debug
  level: warn

veto:
  # Extra regexes matched against dotted change paths
  extra_patterns: []
#    - '(^|\.)lastSeen$'
"#
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
