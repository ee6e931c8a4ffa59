//! Private HTTP client for MIoT cloud communication
//!
//! This crate provides a minimal blocking client used for the two kinds of
//! outbound calls the SDK makes: unauthenticated spec registry lookups and
//! authenticated property queries against the regional OpenHome API.

mod error;

pub use error::HttpError;

use serde::de::DeserializeOwned;
use std::io;
use std::time::Duration;
use tracing::debug;

/// A single `name: value` pair, used for both headers and query parameters
pub type Pair<'a> = (&'a str, &'a str);

/// A minimal blocking HTTP client
#[derive(Debug, Clone)]
pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    /// Create a new client with default configuration (5s connect, 10s read)
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(Duration::from_secs(5))
                .timeout_read(Duration::from_secs(10))
                .build(),
        }
    }

    /// Create a client whose whole request, body included, must finish within `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    /// Send a GET request and return the response body as text
    ///
    /// # Arguments
    /// * `url` - Absolute URL without query string
    /// * `headers` - Headers to set on the request
    /// * `query` - Query parameters, percent-encoded by the client
    pub fn get_text(
        &self,
        url: &str,
        headers: &[Pair<'_>],
        query: &[Pair<'_>],
    ) -> Result<String, HttpError> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }
        for (name, value) in query {
            request = request.query(name, value);
        }

        debug!(url, params = query.len(), "sending GET request");

        let response = request.call().map_err(map_call_error)?;

        response.into_string().map_err(|e| {
            if is_timeout_kind(e.kind()) {
                HttpError::Timeout(e.to_string())
            } else {
                HttpError::Network(e.to_string())
            }
        })
    }

    /// Send a GET request and decode the JSON response body
    pub fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[Pair<'_>],
        query: &[Pair<'_>],
    ) -> Result<T, HttpError> {
        let text = self.get_text(url, headers, query)?;
        serde_json::from_str(&text).map_err(|e| HttpError::Parse(e.to_string()))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_call_error(error: ureq::Error) -> HttpError {
    match error {
        ureq::Error::Status(code, _) => HttpError::Status(code),
        ureq::Error::Transport(transport) => {
            if caused_by_timeout(&transport) {
                HttpError::Timeout(transport.to_string())
            } else {
                HttpError::Network(transport.to_string())
            }
        }
    }
}

/// Walk the source chain looking for an I/O timeout
fn caused_by_timeout(error: &(dyn std::error::Error + 'static)) -> bool {
    let mut current = Some(error);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if is_timeout_kind(io_err.kind()) {
                return true;
            }
        }
        current = err.source();
    }
    false
}

// Blocking sockets report an elapsed read deadline as WouldBlock on unix.
fn is_timeout_kind(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}
