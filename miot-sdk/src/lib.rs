//! # MIoT SDK - property reads through the OpenHome cloud
//!
//! Translates device identifiers into MIoT property identifiers and reads
//! those properties from the regional OpenHome API:
//!
//! ```rust,no_run
//! use miot_sdk::{DeviceId, MiotOpenHome};
//!
//! let miot = MiotOpenHome::builder()
//!     .credentials("2882303761517", "access-token")
//!     .build()?;
//! let response = miot.query("cn", &[DeviceId::new("123456789")])?;
//! # Ok::<(), miot_sdk::SdkError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! miot-sdk (MiotOpenHome, IdentifierPipeline)
//!     ↓
//! spec-cache (DID → type → spec document, registry fallback)
//!     ↓
//! miot-spec (spec model, PID resolution)
//!
//! miot-api (OpenHome property endpoint)
//!     ↓
//! http-client (blocking HTTP)
//! ```

mod client;
mod error;
mod pipeline;

pub use client::{MiotOpenHome, MiotOpenHomeBuilder};
pub use error::SdkError;
pub use pipeline::IdentifierPipeline;

// Re-export the types callers need without extra dependencies
pub use miot_api::{ApiConfig, ApiError, Credentials, RegionTable};
pub use miot_spec::{AccessMode, DeviceId, DeviceType, PropertyId, SpecDocument};
pub use spec_cache::{
    CacheError, CacheStore, HttpSpecRegistry, MemoryStore, SpecCache, SpecCacheConfig,
    SpecRegistry, DEFAULT_REGISTRY_URL,
};
