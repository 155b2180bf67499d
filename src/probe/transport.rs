//! Blocking HTTP capability used to reach processor APIs.

use crate::error::{FailureCause, TransportError};
use crate::model::Snapshot;
use reqwest::blocking::Client;
use std::time::Duration;

/// A completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Status in the 200–299 range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a successful response into a snapshot.
    ///
    /// Non-2xx statuses and unparseable bodies are both reported as a
    /// [`FailureCause`], so callers handle them the same way.
    pub fn into_snapshot(self) -> Result<(Snapshot, Vec<u8>), FailureCause> {
        if !self.is_success() {
            return Err(FailureCause::Status(self.status));
        }
        let snapshot = Snapshot::from_slice(&self.body)?;
        Ok((snapshot, self.body))
    }
}

/// Trait for performing a blocking GET against a processor.
///
/// Any HTTP status is a successful exchange at this level; only failures
/// to get a response at all are errors.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        (**self).get(url, query)
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// Request timeout. `None` leaves requests unbounded, so a hung
    /// processor can stall the whole poll cycle.
    pub timeout: Option<Duration>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// [`Transport`] backed by a blocking reqwest client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    pub fn new(config: &HttpTransportConfig) -> Result<Self, TransportError> {
        let builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        // reqwest's blocking client applies its own default unless told otherwise.
        let builder = builder.timeout(config.timeout);
        let client = builder.build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse, TransportError> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}
