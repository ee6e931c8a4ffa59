//! MiotOpenHome - main entry point for the SDK

use std::sync::Arc;

use miot_api::{ApiClient, ApiConfig, ApiError, Credentials};
use miot_spec::{AccessMode, DeviceId, PropertyId};
use spec_cache::{CacheStore, MemoryStore, SpecCache, SpecCacheConfig, SpecRegistry};
use tracing::debug;

use crate::{IdentifierPipeline, SdkError};

/// Read access to MIoT device properties through the OpenHome cloud
///
/// MiotOpenHome is fully synchronous - no async/await required.
///
/// # Example
///
/// ```rust,no_run
/// use miot_sdk::{DeviceId, MiotOpenHome};
///
/// fn main() -> Result<(), miot_sdk::SdkError> {
///     let miot = MiotOpenHome::builder()
///         .credentials("2882303761517", "access-token")
///         .build()?;
///
///     let response = miot.query("cn", &[DeviceId::new("123456789")])?;
///     println!("{}", response);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MiotOpenHome {
    pipeline: IdentifierPipeline,
    api: ApiClient,
}

impl MiotOpenHome {
    /// Client with default endpoints, backed by `store`
    pub fn new(credentials: Credentials, store: Arc<dyn CacheStore>) -> Self {
        let cache = SpecCache::new(store, SpecCacheConfig::default());
        let api = ApiClient::new(credentials, ApiConfig::default());
        Self::from_parts(IdentifierPipeline::new(cache), api)
    }

    pub fn builder() -> MiotOpenHomeBuilder {
        MiotOpenHomeBuilder::default()
    }

    pub fn from_parts(pipeline: IdentifierPipeline, api: ApiClient) -> Self {
        Self { pipeline, api }
    }

    pub fn spec_cache(&self) -> &SpecCache {
        self.pipeline.cache()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Read all readable properties of `dids` in `region`
    ///
    /// Returns the cloud's JSON response unchanged.
    ///
    /// # Errors
    ///
    /// * `SdkError::Api(ApiError::UnknownRegion)` before any lookup or request
    /// * `SdkError::Cache` if a spec document cannot be obtained
    /// * `SdkError::Api` for failures of the property request itself
    pub fn query(&self, region: &str, dids: &[DeviceId]) -> Result<serde_json::Value, SdkError> {
        if self.api.config().properties_url(region).is_none() {
            return Err(ApiError::UnknownRegion(region.to_string()).into());
        }

        let pids = self.resolve_pids(dids, AccessMode::Read)?;
        debug!(region, devices = dids.len(), pids = pids.len(), "resolved property ids");

        Ok(self.api.query_properties(region, &pids)?)
    }

    /// Property identifiers of `dids` allowing `access`, without contacting the API
    pub fn resolve_pids(
        &self,
        dids: &[DeviceId],
        access: AccessMode,
    ) -> Result<Vec<PropertyId>, SdkError> {
        Ok(self.pipeline.resolve_all(dids, access)?)
    }

    /// Write property values. Not implemented yet.
    pub fn control(
        &self,
        region: &str,
        values: &[(PropertyId, serde_json::Value)],
    ) -> Result<serde_json::Value, SdkError> {
        Ok(self.api.send_control(region, values)?)
    }
}

/// Builder for [`MiotOpenHome`]
#[derive(Default)]
pub struct MiotOpenHomeBuilder {
    credentials: Option<Credentials>,
    api_config: Option<ApiConfig>,
    cache_config: Option<SpecCacheConfig>,
    store: Option<Arc<dyn CacheStore>>,
    registry: Option<Arc<dyn SpecRegistry>>,
}

impl MiotOpenHomeBuilder {
    pub fn credentials(
        mut self,
        app_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(app_id, access_token));
        self
    }

    pub fn api_config(mut self, config: ApiConfig) -> Self {
        self.api_config = Some(config);
        self
    }

    pub fn cache_config(mut self, config: SpecCacheConfig) -> Self {
        self.cache_config = Some(config);
        self
    }

    /// Cache store to use; an empty [`MemoryStore`] if not set
    pub fn store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Spec registry to use instead of the HTTP registry from the cache config
    pub fn registry(mut self, registry: Arc<dyn SpecRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Result<MiotOpenHome, SdkError> {
        let credentials = self
            .credentials
            .ok_or_else(|| SdkError::Config("credentials are required".to_string()))?;
        if credentials.app_id().is_empty() || credentials.access_token().is_empty() {
            return Err(SdkError::Config(
                "app id and access token must not be empty".to_string(),
            ));
        }

        let store: Arc<dyn CacheStore> = match self.store {
            Some(store) => store,
            None => Arc::new(MemoryStore::new()),
        };
        let cache_config = self.cache_config.unwrap_or_default();
        let cache = match self.registry {
            Some(registry) => SpecCache::with_registry(store, registry, cache_config),
            None => SpecCache::new(store, cache_config),
        };

        let api = ApiClient::new(credentials, self.api_config.unwrap_or_default());

        Ok(MiotOpenHome::from_parts(IdentifierPipeline::new(cache), api))
    }
}
