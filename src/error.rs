//! Unified error types for led-volume-logger.
//!
//! Almost every failure in this crate is endpoint-local: a processor that
//! cannot be identified is dropped from the session, and a failed sample is
//! logged and skipped. The types here carry enough context to log those
//! outcomes without losing the underlying cause.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for led-volume-logger operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LedLogError {
    /// Vendor detection exhausted every known API for a host.
    #[error("Vendor detection failed for {host}: {source}")]
    ProbeFailure {
        host: String,
        #[source]
        source: FailureCause,
    },

    /// A single poll of an already identified processor failed.
    #[error("Sampling {endpoint} failed: {source}")]
    Sample {
        endpoint: String,
        #[source]
        source: FailureCause,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Why a request against a processor did not produce a snapshot.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum FailureCause {
    #[error("{0}")]
    Transport(#[from] TransportError),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
}

/// Transport-level failures, before any HTTP status is available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_connect() {
            Self::Connect(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for led-volume-logger operations
pub type Result<T> = std::result::Result<T, LedLogError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl LedLogError {
    /// Create a probe failure for a host
    pub fn probe(host: impl Into<String>, source: impl Into<FailureCause>) -> Self {
        Self::ProbeFailure {
            host: host.into(),
            source: source.into(),
        }
    }

    /// Create a sampling error for an endpoint
    pub fn sample(endpoint: impl Into<String>, source: impl Into<FailureCause>) -> Self {
        Self::Sample {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let message = format!("{source}");
        Self::Io {
            path: Some(path.into()),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

impl From<std::io::Error> for LedLogError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for FailureCause {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidBody(err.to_string())
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to whatever context the error already
/// carries, so nested call sites produce `outer: inner: cause` chains.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<LedLogError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: LedLogError, new_ctx: &str) -> LedLogError {
    match err {
        LedLogError::Io {
            path,
            message,
            source,
        } => LedLogError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        LedLogError::Config(msg) => LedLogError::Config(chain_context(new_ctx, &msg)),
        LedLogError::Validation(msg) => LedLogError::Validation(chain_context(new_ctx, &msg)),
        // Host and endpoint already identify where these happened.
        other @ (LedLogError::ProbeFailure { .. } | LedLogError::Sample { .. }) => other,
    }
}

/// Chain two context strings together as "`new`: `existing`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_failure_display_carries_cause() {
        let err = LedLogError::probe("10.0.0.1", FailureCause::Status(404));
        let display = err.to_string();
        assert!(display.contains("10.0.0.1"), "missing host: {display}");
        assert!(display.contains("404"), "missing status: {display}");
    }

    #[test]
    fn test_transport_cause_converts() {
        let cause: FailureCause = TransportError::Connect("refused".into()).into();
        assert!(matches!(cause, FailureCause::Transport(TransportError::Connect(_))));
        assert_eq!(cause.to_string(), "connection failed: refused");
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = LedLogError::io("/var/log/led-volume.log", io_err);
        assert!(err.to_string().contains("/var/log/led-volume.log"));
    }

    #[test]
    fn test_context_chaining_multiple_levels() {
        fn inner() -> Result<()> {
            Err(LedLogError::config("base"))
        }

        fn outer() -> Result<()> {
            inner().context("middle layer").context("outer layer")
        }

        match outer() {
            Err(LedLogError::Config(msg)) => {
                assert_eq!(msg, "outer layer: middle layer: base");
            }
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_with_context_lazy_evaluation() {
        let mut called = false;
        let ok_result: Result<i32> = Ok(42);
        let _ = ok_result.with_context(|| {
            called = true;
            "should not be called"
        });
        assert!(!called, "Closure should not be called for Ok result");
    }

    #[test]
    fn test_probe_failure_ignores_extra_context() {
        let err: Result<()> = Err(LedLogError::probe("host", FailureCause::Status(500)));
        let err = err.context("connecting").unwrap_err();
        assert!(matches!(err, LedLogError::ProbeFailure { .. }));
    }

    #[test]
    fn test_chain_context_helper() {
        assert_eq!(chain_context("new", ""), "new");
        assert_eq!(chain_context("new", "existing"), "new: existing");
    }
}
