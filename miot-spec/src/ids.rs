//! Identity types for devices, device models and properties

use crate::error::{Result, SpecError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! impl_id_type {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name::new(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name::new(s)
            }
        }
    };
}

/// Identifier of a physical device (DID), as handed out by the MIoT cloud
///
/// DIDs are opaque; some families (e.g. BLE sub-devices, `blt.3.xxxx`)
/// contain dots themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(String);

impl_id_type!(DeviceId);

/// URN naming the spec schema of a device model,
/// e.g. `urn:miot-spec-v2:device:light:0000A001:yeelink-color1:1`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceType(String);

impl_id_type!(DeviceType);

/// Fully-qualified property identifier, `<DID>.<SIID>.<PIID>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyId {
    pub did: DeviceId,
    pub siid: u32,
    pub piid: u32,
}

impl PropertyId {
    pub fn new(did: DeviceId, siid: u32, piid: u32) -> Self {
        Self { did, siid, piid }
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.did, self.siid, self.piid)
    }
}

impl FromStr for PropertyId {
    type Err = SpecError;

    /// Parses from the right so that DIDs containing dots survive.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || SpecError::InvalidPropertyId(s.to_string());

        let mut parts = s.rsplitn(3, '.');
        let piid = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let siid = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let did = parts.next().filter(|d| !d.is_empty()).ok_or_else(invalid)?;

        Ok(Self::new(DeviceId::new(did), siid, piid))
    }
}
