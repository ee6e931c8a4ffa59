//! Device type and spec document lookups backed by a cache store

use crate::error::Result;
use crate::registry::{HttpSpecRegistry, SpecRegistry, DEFAULT_REGISTRY_URL};
use crate::store::CacheStore;
use miot_spec::{DeviceId, DeviceType, SpecDocument};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Hash holding DID → device type URN
pub const DEVICE_TYPE_HASH: &str = "miot:did:type";

/// Hash holding device type URN → spec document JSON
pub const INSTANCE_SPEC_HASH: &str = "miot:instance:spec";

/// Device type assumed for DIDs with no cached mapping
pub const DEFAULT_DEVICE_TYPE: &str = "urn:miot-spec-v2:device:light:0000A001:yeelink-color1:1";

/// Configuration for a [`SpecCache`]
#[derive(Debug, Clone)]
pub struct SpecCacheConfig {
    pub registry_url: String,
    pub registry_timeout: Duration,
    pub default_device_type: DeviceType,
    pub device_type_hash: String,
    pub instance_spec_hash: String,
}

impl Default for SpecCacheConfig {
    fn default() -> Self {
        Self {
            registry_url: DEFAULT_REGISTRY_URL.to_string(),
            registry_timeout: Duration::from_secs(10),
            default_device_type: DeviceType::new(DEFAULT_DEVICE_TYPE),
            device_type_hash: DEVICE_TYPE_HASH.to_string(),
            instance_spec_hash: INSTANCE_SPEC_HASH.to_string(),
        }
    }
}

impl SpecCacheConfig {
    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    pub fn with_registry_timeout(mut self, timeout: Duration) -> Self {
        self.registry_timeout = timeout;
        self
    }

    pub fn with_default_device_type(mut self, device_type: impl Into<DeviceType>) -> Self {
        self.default_device_type = device_type.into();
        self
    }
}

/// Cache-backed resolution of DIDs to device types and device types to spec documents
///
/// The DID → type mapping is populated by an external provisioning process;
/// lookups that miss fall back to the configured default type. Spec documents
/// are fetched from the registry on miss and written back as raw JSON.
#[derive(Clone)]
pub struct SpecCache {
    store: Arc<dyn CacheStore>,
    registry: Arc<dyn SpecRegistry>,
    config: SpecCacheConfig,
}

impl SpecCache {
    /// Create a cache that fetches misses from the HTTP registry named in `config`
    pub fn new(store: Arc<dyn CacheStore>, config: SpecCacheConfig) -> Self {
        let registry = HttpSpecRegistry::with_timeout(
            config.registry_url.clone(),
            config.registry_timeout,
        );
        Self::with_registry(store, Arc::new(registry), config)
    }

    /// Create a cache with a custom registry
    pub fn with_registry(
        store: Arc<dyn CacheStore>,
        registry: Arc<dyn SpecRegistry>,
        config: SpecCacheConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    pub fn config(&self) -> &SpecCacheConfig {
        &self.config
    }

    /// Device type of `did`, or the default type when none is cached
    ///
    /// Never fails: store errors are logged and treated as a miss.
    pub fn type_of(&self, did: &DeviceId) -> DeviceType {
        match self.store.hget(&self.config.device_type_hash, did.as_str()) {
            Ok(Some(device_type)) if !device_type.is_empty() => DeviceType::new(device_type),
            Ok(_) => {
                debug!(
                    %did,
                    default = %self.config.default_device_type,
                    "no cached device type, using default"
                );
                self.config.default_device_type.clone()
            }
            Err(e) => {
                warn!(%did, error = %e, "device type lookup failed, using default");
                self.config.default_device_type.clone()
            }
        }
    }

    /// Record the device type of `did`
    pub fn remember_type(&self, did: &DeviceId, device_type: &DeviceType) -> Result<()> {
        self.store.hset(
            &self.config.device_type_hash,
            did.as_str(),
            device_type.as_str(),
        )
    }

    /// Spec document for `device_type`, fetched from the registry on cache miss
    ///
    /// # Errors
    ///
    /// * `CacheError::Store` if the store fails
    /// * `CacheError::RegistryUnavailable` if the registry fetch fails
    /// * `CacheError::MalformedSpecDocument` if the cached or fetched text does
    ///   not parse; unparseable registry responses are not written back
    pub fn spec_of(&self, device_type: &DeviceType) -> Result<SpecDocument> {
        let hash = &self.config.instance_spec_hash;

        if let Some(json) = self.store.hget(hash, device_type.as_str())? {
            if !json.is_empty() {
                debug!(%device_type, "spec cache hit");
                return Ok(SpecDocument::from_json(&json)?);
            }
        }

        debug!(%device_type, "spec cache miss");
        let json = self.registry.fetch(device_type)?;
        let spec = SpecDocument::from_json(&json)?;
        self.store.hset(hash, device_type.as_str(), &json)?;

        Ok(spec)
    }
}

impl std::fmt::Debug for SpecCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
