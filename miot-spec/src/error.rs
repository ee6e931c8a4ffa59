//! Error types for spec parsing and identifier handling

use thiserror::Error;

/// Errors produced while reading spec documents or identifiers
#[derive(Debug, Error)]
pub enum SpecError {
    /// The text is not a valid MIoT spec document
    #[error("Malformed spec document: {0}")]
    MalformedSpecDocument(String),

    /// The text is not of the form `did.siid.piid`
    #[error("Invalid property id: {0}")]
    InvalidPropertyId(String),
}

/// Convenience Result type alias for spec operations.
pub type Result<T> = std::result::Result<T, SpecError>;
