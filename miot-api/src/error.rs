use http_client::HttpError;
use thiserror::Error;

/// High-level API errors for OpenHome requests
#[derive(Debug, Error)]
pub enum ApiError {
    /// The region has no entry in the configured region table
    ///
    /// Raised before any network activity.
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// The request exceeded its deadline
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The cloud answered with a 4xx or 5xx status
    #[error("HTTP error: status {status}")]
    HttpStatus { status: u16 },

    /// Connection-level failure (DNS, refused, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body is not JSON
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The operation exists in the API surface but has no implementation yet
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Type alias for results that can return an ApiError
pub type Result<T> = std::result::Result<T, ApiError>;

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Network(msg) => ApiError::Transport(msg),
            HttpError::Timeout(msg) => ApiError::Timeout(msg),
            HttpError::Status(status) => ApiError::HttpStatus { status },
            HttpError::Parse(msg) => ApiError::MalformedResponse(msg),
        }
    }
}
