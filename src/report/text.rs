//! Plain-text change log lines.

use super::{ChangeRecord, ChangeReporter, SESSION_END_MARKER, SESSION_START_MARKER};
use crate::config::DATE_FORMAT;
use std::io::Write;

/// Writes `<timestamp> <line>` per event.
pub struct TextReporter<W: Write> {
    writer: W,
    timestamps: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            timestamps: true,
        }
    }

    /// Lines without the local-time prefix, for stdout and tests.
    pub fn without_timestamps(writer: W) -> Self {
        Self {
            writer,
            timestamps: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, message: &str) -> anyhow::Result<()> {
        // Built up front so a rotating writer never splits a line.
        let line = if self.timestamps {
            format!("{} {message}\n", chrono::Local::now().format(DATE_FORMAT))
        } else {
            format!("{message}\n")
        };
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> ChangeReporter for TextReporter<W> {
    fn on_session_start(&mut self) -> anyhow::Result<()> {
        self.write_line(SESSION_START_MARKER)
    }

    fn on_change(&mut self, record: &ChangeRecord<'_>) -> anyhow::Result<()> {
        self.write_line(&record.line())
    }

    fn on_session_end(&mut self) -> anyhow::Result<()> {
        self.write_line(SESSION_END_MARKER)
    }
}
