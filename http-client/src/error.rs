//! Error types for the HTTP client

use thiserror::Error;

/// Errors that can occur during an HTTP exchange
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, DNS or I/O failure before a response arrived
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The request did not complete within the configured deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a 4xx or 5xx status
    #[error("HTTP status {0}")]
    Status(u16),

    /// The response body could not be decoded
    #[error("Body decoding error: {0}")]
    Parse(String),
}
