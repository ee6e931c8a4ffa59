use crate::config::ApiConfig;
use crate::{ApiError, Result};
use http_client::HttpClient;
use miot_spec::PropertyId;
use std::fmt;
use tracing::debug;

/// Application credentials issued by the MIoT open platform
#[derive(Clone)]
pub struct Credentials {
    app_id: String,
    access_token: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            access_token: access_token.into(),
        }
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// A client for the OpenHome property API
///
/// Every request carries the credentials and a `Request-Id` that is fixed for
/// the lifetime of the client.
///
/// # Example
///
/// ```no_run
/// use miot_api::{ApiClient, ApiConfig, Credentials};
/// use miot_spec::PropertyId;
///
/// let client = ApiClient::new(Credentials::new("2882303761517", "token"), ApiConfig::default());
/// let pids = vec!["123.2.1".parse::<PropertyId>()?];
/// let response = client.query_properties("cn", &pids)?;
/// println!("{}", response);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    config: ApiConfig,
    credentials: Credentials,
    request_id: String,
}

impl ApiClient {
    pub fn new(credentials: Credentials, config: ApiConfig) -> Self {
        Self {
            http: HttpClient::with_timeout(config.timeout),
            config,
            credentials,
            request_id: uuid::Uuid::new_v4().simple().to_string(),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Read property values from the region's property endpoint
    ///
    /// The identifiers are sent comma-separated in the `pid` query parameter.
    /// The response body is returned as untyped JSON.
    ///
    /// # Errors
    ///
    /// * `ApiError::UnknownRegion` if `region` is not in the region table (no request is made)
    /// * `ApiError::Timeout`, `ApiError::Transport` for network failures
    /// * `ApiError::HttpStatus` for 4xx/5xx answers
    /// * `ApiError::MalformedResponse` if the body is not JSON
    pub fn query_properties(&self, region: &str, pids: &[PropertyId]) -> Result<serde_json::Value> {
        let url = self
            .config
            .properties_url(region)
            .ok_or_else(|| ApiError::UnknownRegion(region.to_string()))?;

        let pid = pids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        debug!(
            region,
            %url,
            count = pids.len(),
            request_id = %self.request_id,
            "querying properties"
        );

        let headers = [
            ("App-Id", self.credentials.app_id()),
            ("Access-Token", self.credentials.access_token()),
            ("Spec-NS", self.config.spec_namespace.as_str()),
            ("Content-Type", "application/json"),
            ("Request-Id", self.request_id.as_str()),
        ];

        Ok(self.http.get_json(&url, &headers, &[("pid", pid.as_str())])?)
    }

    /// Write property values
    ///
    /// Always returns `ApiError::NotImplemented`; no request is made.
    pub fn send_control(
        &self,
        _region: &str,
        _values: &[(PropertyId, serde_json::Value)],
    ) -> Result<serde_json::Value> {
        Err(ApiError::NotImplemented("property control"))
    }
}
