//! Spec cache for miot-sdk
//!
//! Resolves device identifiers to device types and device types to parsed
//! spec documents. Both mappings live in an injected [`CacheStore`]; spec
//! documents missing from the store are fetched from a [`SpecRegistry`]
//! (by default the public MIoT spec registry) and written back.
//!
//! ```no_run
//! use spec_cache::{MemoryStore, SpecCache, SpecCacheConfig};
//! use miot_spec::DeviceId;
//! use std::sync::Arc;
//!
//! let cache = SpecCache::new(Arc::new(MemoryStore::new()), SpecCacheConfig::default());
//! let device_type = cache.type_of(&DeviceId::new("123456"));
//! let spec = cache.spec_of(&device_type)?;
//! println!("{} services", spec.services.len());
//! # Ok::<(), spec_cache::CacheError>(())
//! ```

mod cache;
mod error;
mod registry;
mod store;

pub use cache::{
    SpecCache, SpecCacheConfig, DEFAULT_DEVICE_TYPE, DEVICE_TYPE_HASH, INSTANCE_SPEC_HASH,
};
pub use error::{CacheError, Result};
pub use registry::{HttpSpecRegistry, SpecRegistry, DEFAULT_REGISTRY_URL};
pub use store::{CacheStore, MemoryStore};
