//! Static endpoint configuration for the OpenHome API

use std::collections::BTreeMap;
use std::time::Duration;

/// Region name → API host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTable {
    hosts: BTreeMap<String, String>,
}

impl RegionTable {
    /// An empty table
    pub fn empty() -> Self {
        Self {
            hosts: BTreeMap::new(),
        }
    }

    /// Add or replace a region
    pub fn with_region(mut self, region: impl Into<String>, host: impl Into<String>) -> Self {
        self.hosts.insert(region.into(), host.into());
        self
    }

    pub fn host(&self, region: &str) -> Option<&str> {
        self.hosts.get(region).map(String::as_str)
    }

    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }
}

impl Default for RegionTable {
    fn default() -> Self {
        Self::empty()
            .with_region("cn", "api.home.mi.com")
            .with_region("us", "us.api.home.mi.com")
            .with_region("sg", "sg.api.home.mi.com")
            .with_region("de", "de.api.home.mi.com")
            .with_region("ru", "ru.api.home.mi.com")
            .with_region("in", "i2.api.home.mi.com")
    }
}

/// Endpoint layout and request policy for [`ApiClient`](crate::ApiClient)
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub regions: RegionTable,
    pub scheme: String,
    pub properties_path: String,
    pub spec_namespace: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            regions: RegionTable::default(),
            scheme: "http".to_string(),
            properties_path: "/api/v1/properties".to_string(),
            spec_namespace: "miot-spec-v2".to_string(),
            timeout: Duration::from_secs(3),
        }
    }
}

impl ApiConfig {
    pub fn with_regions(mut self, regions: RegionTable) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Property read endpoint for `region`, `None` if the region is unknown
    pub fn properties_url(&self, region: &str) -> Option<String> {
        let host = self.regions.host(region)?;
        Some(format!("{}://{}{}", self.scheme, host, self.properties_path))
    }
}
