//! MIoT spec model
//!
//! Typed view of the MIoT "spec v2" documents that describe a device model's
//! services and properties, the identifier types used to address devices and
//! properties, and the resolver that turns a (device, spec, access mode)
//! triple into property identifiers.
//!
//! ```
//! use miot_spec::{pick, AccessMode, DeviceId, SpecDocument};
//!
//! let spec = SpecDocument::from_json(r#"{"services": [
//!     {"iid": 2, "properties": [{"iid": 1, "access": ["read", "write"]}]}
//! ]}"#).unwrap();
//!
//! let did = DeviceId::new("123");
//! for pid in pick(&did, &spec, AccessMode::Write) {
//!     println!("{}", pid);
//! }
//! ```

mod document;
mod error;
mod ids;
mod resolver;

pub use document::{Access, AccessMode, Property, Service, SpecDocument};
pub use error::{Result, SpecError};
pub use ids::{DeviceId, DeviceType, PropertyId};
pub use resolver::pick;
