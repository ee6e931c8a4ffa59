//! DID → property identifier resolution

use miot_spec::{pick, AccessMode, DeviceId, PropertyId};
use spec_cache::{CacheError, SpecCache};
use tracing::debug;

/// Resolves batches of devices to property identifiers
///
/// For every device, in input order: device type from the cache, spec
/// document for that type, then the properties allowing the requested access.
#[derive(Debug, Clone)]
pub struct IdentifierPipeline {
    cache: SpecCache,
}

impl IdentifierPipeline {
    pub fn new(cache: SpecCache) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &SpecCache {
        &self.cache
    }

    /// Property identifiers of all `dids` allowing `access`, device by device
    ///
    /// The first spec lookup failure aborts the whole batch.
    pub fn resolve_all(
        &self,
        dids: &[DeviceId],
        access: AccessMode,
    ) -> Result<Vec<PropertyId>, CacheError> {
        let mut pids = Vec::new();

        for did in dids {
            let device_type = self.cache.type_of(did);
            let spec = self.cache.spec_of(&device_type)?;

            let before = pids.len();
            pids.extend(pick(did, &spec, access));
            debug!(
                %did,
                %device_type,
                %access,
                matched = pids.len() - before,
                "resolved device properties"
            );
        }

        Ok(pids)
    }
}
