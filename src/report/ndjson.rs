//! Machine-readable change log, one JSON object per line.

use super::{ChangeRecord, ChangeReporter};
use crate::model::Snapshot;
use std::io::Write;

pub struct NdjsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonReporter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_event(&mut self, event: &serde_json::Value) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');
        self.writer.write_all(&line)?;
        self.writer.flush()?;
        Ok(())
    }

    fn session_event(&mut self, kind: &str) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": kind,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        self.write_event(&event)
    }
}

impl<W: Write> ChangeReporter for NdjsonReporter<W> {
    fn on_session_start(&mut self) -> anyhow::Result<()> {
        self.session_event("session_start")
    }

    fn on_change(&mut self, record: &ChangeRecord<'_>) -> anyhow::Result<()> {
        let event = serde_json::json!({
            "type": "change",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "endpoint": record.endpoint,
            "path": record.path,
            "kind": record.kind,
            "old": record.old.map(Snapshot::to_value),
            "new": record.new.map(Snapshot::to_value),
        });
        self.write_event(&event)
    }

    fn on_session_end(&mut self) -> anyhow::Result<()> {
        self.session_event("session_end")
    }
}
