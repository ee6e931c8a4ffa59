//! Remote spec registry access

use crate::error::{CacheError, Result};
use http_client::{HttpClient, HttpError};
use miot_spec::DeviceType;
use std::time::Duration;
use tracing::debug;

/// Public MIoT spec registry endpoint, queried with `?type=<urn>`
pub const DEFAULT_REGISTRY_URL: &str = "https://miot-spec.org/miot-spec-v2/instance";

/// Source of spec documents keyed by device type
pub trait SpecRegistry: Send + Sync {
    /// Fetch the raw JSON text of the spec document for `device_type`
    fn fetch(&self, device_type: &DeviceType) -> Result<String>;
}

/// Spec registry reached over unauthenticated HTTP GET
#[derive(Debug, Clone)]
pub struct HttpSpecRegistry {
    client: HttpClient,
    url: String,
}

impl HttpSpecRegistry {
    /// Registry at `url` using the default client timeouts
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::new(),
            url: url.into(),
        }
    }

    /// Registry at `url` with an overall per-request deadline
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: HttpClient::with_timeout(timeout),
            url: url.into(),
        }
    }
}

impl SpecRegistry for HttpSpecRegistry {
    fn fetch(&self, device_type: &DeviceType) -> Result<String> {
        debug!(%device_type, url = %self.url, "fetching spec document from registry");

        self.client
            .get_text(&self.url, &[], &[("type", device_type.as_str())])
            .map_err(|e| match e {
                HttpError::Status(code) => CacheError::RegistryUnavailable(format!(
                    "registry answered HTTP {} for {}",
                    code, device_type
                )),
                other => CacheError::RegistryUnavailable(other.to_string()),
            })
    }
}
