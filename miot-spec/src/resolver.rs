//! Property identifier resolution
//!
//! Walks a spec document and assembles `<DID>.<SIID>.<PIID>` identifiers for
//! every property that supports the requested access mode.

use crate::document::{AccessMode, SpecDocument};
use crate::ids::{DeviceId, PropertyId};

/// Pick the property identifiers of `did` that allow `access`.
///
/// Services are visited in document order, then properties within each
/// service in document order. The returned iterator is lazy and can be cloned
/// to restart it. Duplicate iids in a document produce duplicate identifiers.
///
/// # Examples
///
/// ```
/// use miot_spec::{pick, AccessMode, DeviceId, SpecDocument};
///
/// let spec = SpecDocument::from_json(
///     r#"{"services": [{"iid": 2, "properties": [{"iid": 1, "access": ["read"]}]}]}"#,
/// ).unwrap();
/// let did = DeviceId::new("123");
///
/// let pids: Vec<String> = pick(&did, &spec, AccessMode::Read).map(|p| p.to_string()).collect();
/// assert_eq!(pids, vec!["123.2.1"]);
/// ```
pub fn pick<'a>(
    did: &'a DeviceId,
    spec: &'a SpecDocument,
    access: AccessMode,
) -> impl Iterator<Item = PropertyId> + Clone + 'a {
    spec.services.iter().flat_map(move |service| {
        service
            .properties
            .iter()
            .filter(move |property| property.allows(access))
            .map(move |property| PropertyId::new(did.clone(), service.iid, property.iid))
    })
}
