//! Change log output.
//!
//! The change log is its own stream, separate from the operational
//! `tracing` output. A [`ChangeReporter`] is built once by the caller and
//! handed to the poll loop, which reports session markers and one
//! [`ChangeRecord`] per changed path.

mod ndjson;
mod rotate;
mod text;

pub use ndjson::NdjsonReporter;
pub use rotate::RotatingFileWriter;
pub use text::TextReporter;

use crate::config::{ChangeLogConfig, ChangeLogFormat};
use crate::diff::ChangeKind;
use crate::model::{ChangePath, Snapshot};
use crate::error::{ErrorContext, LedLogError};
use std::io::Write;

/// Marker written once endpoints are set up.
pub const SESSION_START_MARKER: &str = "(Process started)";

/// Marker written when the loop ends.
pub const SESSION_END_MARKER: &str = "(Process exiting)";

/// Rendering used when one side of a change has no value.
pub const ABSENT_VALUE: &str = "(absent)";

/// One changed path on one processor, with both sides resolved.
#[derive(Debug, Clone, Copy)]
pub struct ChangeRecord<'a> {
    /// Display id of the processor.
    pub endpoint: &'a str,
    pub path: &'a ChangePath,
    pub kind: ChangeKind,
    /// Value in the older sample, `None` if it does not resolve there.
    pub old: Option<&'a Snapshot>,
    /// Value in the newer sample, `None` if it does not resolve there.
    pub new: Option<&'a Snapshot>,
}

impl ChangeRecord<'_> {
    /// `<endpoint>:<path>: <old> -> <new>`, without a timestamp.
    pub fn line(&self) -> String {
        format!(
            "{}:{}: {} -> {}",
            self.endpoint,
            self.path,
            render_value(self.old),
            render_value(self.new)
        )
    }
}

/// Render one side of a change for the text log.
pub fn render_value(value: Option<&Snapshot>) -> String {
    value.map_or_else(|| ABSENT_VALUE.to_string(), ToString::to_string)
}

/// Receives change log events from the poll loop.
pub trait ChangeReporter {
    /// Called once after endpoint construction, before the first cycle.
    fn on_session_start(&mut self) -> anyhow::Result<()>;

    /// Called for every reported path.
    fn on_change(&mut self, record: &ChangeRecord<'_>) -> anyhow::Result<()>;

    /// Called once when the loop ends.
    fn on_session_end(&mut self) -> anyhow::Result<()>;
}

impl<R: ChangeReporter + ?Sized> ChangeReporter for Box<R> {
    fn on_session_start(&mut self) -> anyhow::Result<()> {
        (**self).on_session_start()
    }

    fn on_change(&mut self, record: &ChangeRecord<'_>) -> anyhow::Result<()> {
        (**self).on_change(record)
    }

    fn on_session_end(&mut self) -> anyhow::Result<()> {
        (**self).on_session_end()
    }
}

/// Build the change log sink described by `config`.
pub fn build_reporter(config: &ChangeLogConfig) -> anyhow::Result<Box<dyn ChangeReporter>> {
    let writer: Box<dyn Write + Send> = if config.is_stdout() {
        Box::new(std::io::stdout())
    } else {
        let file = RotatingFileWriter::open(&config.path, config.max_bytes, config.backup_count)
            .map_err(|e| LedLogError::io(&config.path, e))
            .context("Cannot open change log")?;
        Box::new(file)
    };

    Ok(match config.format {
        ChangeLogFormat::Text => Box::new(TextReporter::new(writer)),
        ChangeLogFormat::Ndjson => Box::new(NdjsonReporter::new(writer)),
    })
}
