//! MIoT OpenHome API client
//!
//! Issues authenticated requests against the regional OpenHome cloud
//! endpoints. Endpoint layout (region table, paths, timeout) is an immutable
//! [`ApiConfig`] handed to the client at construction.

mod client;
mod config;
mod error;

pub use client::{ApiClient, Credentials};
pub use config::{ApiConfig, RegionTable};
pub use error::{ApiError, Result};
