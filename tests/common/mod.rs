//! Shared fixtures for integration tests.

#![allow(dead_code)]

use led_volume_logger::error::TransportError;
use led_volume_logger::probe::{HttpResponse, Transport};
use led_volume_logger::report::{ChangeRecord, ChangeReporter};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Reply = Result<HttpResponse, TransportError>;

/// Transport that replays canned replies per URL.
///
/// Replies for a URL are consumed in order; the last one repeats. URLs
/// without a script fail as if the connection was refused. Every request is
/// recorded as `url` or `url?key=value`.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(self, url: &str, reply: Reply) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn json(self, url: &str, body: &str) -> Self {
        self.push(url, Ok(HttpResponse::new(200, body.as_bytes())))
    }

    pub fn status(self, url: &str, status: u16) -> Self {
        self.push(url, Ok(HttpResponse::new(status, Vec::new())))
    }

    pub fn refuse(self, url: &str) -> Self {
        self.push(url, Err(TransportError::Connect("connection refused".into())))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Reply {
        let mut call = url.to_string();
        for (i, (key, value)) in query.iter().enumerate() {
            call.push(if i == 0 { '?' } else { '&' });
            call.push_str(&format!("{key}={value}"));
        }
        self.calls.lock().unwrap().push(call);

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap(),
            None => Err(TransportError::Connect(format!("no route to {url}"))),
        }
    }
}

/// Reporter that keeps every event as a line.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl ChangeReporter for RecordingReporter {
    fn on_session_start(&mut self) -> anyhow::Result<()> {
        self.events.push("start".to_string());
        Ok(())
    }

    fn on_change(&mut self, record: &ChangeRecord<'_>) -> anyhow::Result<()> {
        self.events.push(record.line());
        Ok(())
    }

    fn on_session_end(&mut self) -> anyhow::Result<()> {
        self.events.push("end".to_string());
        Ok(())
    }
}

pub const MEGAPIXEL_DATA: &str = "http://10.0.0.0/api/v1/data";
pub const BROMPTON_BASE: &str = "http://10.0.0.1/api/";
pub const BROMPTON_PROBE: &str = "http://10.0.0.1/api/system/processor-type";
