//! Configuration validation.

use super::types::{AppConfig, ChangeLogConfig, PollingConfig, VetoConfig};
use crate::diff::VetoRule;
use crate::error::{LedLogError, Result};
use crate::model::{MAX_MAX_SAMPLES, MIN_MAX_SAMPLES};

// ============================================================================
// Configuration Error
// ============================================================================

/// A single failed check, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.polling.validate());
        errors.extend(self.change_log.validate());
        errors.extend(self.veto.validate());
        errors
    }
}

impl AppConfig {
    /// Full validation for a polling session, which also needs hosts.
    pub fn validate_for_watch(&self) -> Vec<ConfigError> {
        let mut errors = self.validate();
        if self.hosts.is_empty() {
            errors.push(ConfigError::new(
                "hosts",
                "At least one processor host is required",
            ));
        }
        errors
    }

    /// [`validate_for_watch`](Self::validate_for_watch) as a single error.
    pub fn ensure_valid_for_watch(&self) -> Result<()> {
        let errors = self.validate_for_watch();
        if errors.is_empty() {
            return Ok(());
        }
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        Err(LedLogError::validation(details.join("; ")))
    }
}

impl Validatable for PollingConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if !self.interval_secs.is_finite() || self.interval_secs <= 0.0 {
            errors.push(ConfigError::new(
                "polling.interval_secs",
                format!(
                    "Interval must be a positive number of seconds, got {}",
                    self.interval_secs
                ),
            ));
        }

        if self.max_samples < MIN_MAX_SAMPLES {
            errors.push(ConfigError::new(
                "polling.max_samples",
                format!(
                    "At least {MIN_MAX_SAMPLES} samples are needed for a comparison, got {}",
                    self.max_samples
                ),
            ));
        } else if self.max_samples > MAX_MAX_SAMPLES {
            errors.push(ConfigError::new(
                "polling.max_samples",
                format!(
                    "At most {MAX_MAX_SAMPLES} samples can be retained, got {}",
                    self.max_samples
                ),
            ));
        }

        if self.request_timeout_secs == Some(0) {
            errors.push(ConfigError::new(
                "polling.request_timeout_secs",
                "Timeout must be positive; omit it to disable the timeout",
            ));
        }

        errors
    }
}

impl Validatable for ChangeLogConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.max_bytes == 0 {
            errors.push(ConfigError::new(
                "change_log.max_bytes",
                "Rotation size must be greater than zero",
            ));
        }

        if !self.is_stdout() {
            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "change_log.path",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for VetoConfig {
    fn validate(&self) -> Vec<ConfigError> {
        self.extra_patterns
            .iter()
            .enumerate()
            .filter_map(|(idx, pattern)| {
                VetoRule::new(format!("extra-{idx}"), pattern)
                    .err()
                    .map(|message| ConfigError::new("veto.extra_patterns", message))
            })
            .collect()
    }
}
