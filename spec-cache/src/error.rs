use miot_spec::SpecError;
use thiserror::Error;

/// Errors from spec cache lookups
#[derive(Debug, Error)]
pub enum CacheError {
    /// The backing cache store failed to read or write
    #[error("Cache store error: {0}")]
    Store(String),

    /// The spec registry could not be reached or refused the request
    #[error("Spec registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// The cached or fetched text is not a usable spec document
    #[error("Malformed spec document: {0}")]
    MalformedSpecDocument(String),
}

pub type Result<T> = std::result::Result<T, CacheError>;

impl From<SpecError> for CacheError {
    fn from(error: SpecError) -> Self {
        match error {
            SpecError::MalformedSpecDocument(msg) => CacheError::MalformedSpecDocument(msg),
            SpecError::InvalidPropertyId(msg) => CacheError::MalformedSpecDocument(msg),
        }
    }
}
