//! MIoT spec document model
//!
//! A spec document is the vendor-published description of a device model, as
//! served by `https://miot-spec.org/miot-spec-v2/instance?type=<urn>`. Only the
//! parts needed to build property identifiers are typed; actions and events
//! are kept as raw JSON.

use crate::error::{Result, SpecError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access mode a property can be requested with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    Read,
    Write,
    Notify,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Read => "read",
            AccessMode::Write => "write",
            AccessMode::Notify => "notify",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "read" => Ok(AccessMode::Read),
            "write" => Ok(AccessMode::Write),
            "notify" => Ok(AccessMode::Notify),
            other => Err(format!(
                "unknown access mode '{}', expected read, write or notify",
                other
            )),
        }
    }
}

/// One entry of a property's `access` list
///
/// Vendors occasionally publish values outside read/write/notify; those are
/// kept verbatim and never match a requested mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Access {
    Mode(AccessMode),
    Other(String),
}

/// Root of a spec document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    #[serde(rename = "type", default)]
    pub device_type: String,
    #[serde(default)]
    pub description: String,
    pub services: Vec<Service>,
}

/// A service instance (SIID) within a device model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub iid: u32,
    #[serde(rename = "type", default)]
    pub service_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<serde_json::Value>,
}

/// A property instance (PIID) within a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub iid: u32,
    #[serde(rename = "type", default)]
    pub property_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default)]
    pub access: Vec<Access>,
}

impl Property {
    /// Whether this property's access list contains `mode`
    pub fn allows(&self, mode: AccessMode) -> bool {
        self.access
            .iter()
            .any(|access| matches!(access, Access::Mode(m) if *m == mode))
    }
}

impl SpecDocument {
    /// Parse a spec document from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns `SpecError::MalformedSpecDocument` if the text is not JSON or
    /// lacks the `services` structure.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            SpecError::MalformedSpecDocument(format!("Failed to parse spec JSON: {}", e))
        })
    }

    /// Serialize back to JSON text
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| SpecError::MalformedSpecDocument(e.to_string()))
    }
}
