//! Cache store capability and the in-process implementation
//!
//! The store is modelled on a hash-of-hashes cache service: a top-level key
//! names a hash, and each hash maps fields to string values.

use crate::error::{CacheError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Hash-field get/set access to an external cache service
pub trait CacheStore: Send + Sync {
    /// Read `field` of hash `key`, `None` when either is absent
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>>;

    /// Write `value` to `field` of hash `key`, replacing any previous value
    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()>;
}

impl<T: CacheStore + ?Sized> CacheStore for Arc<T> {
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        (**self).hget(key, field)
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        (**self).hset(key, field, value)
    }
}

type Hashes = HashMap<String, HashMap<String, String>>;

/// Thread-safe in-memory cache store
///
/// Clones share the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    hashes: Arc<RwLock<Hashes>>,
}

impl MemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a JSON snapshot of the form
    /// `{"<hash>": {"<field>": "<value>", ...}, ...}`
    pub fn from_snapshot_json(json: &str) -> Result<Self> {
        let hashes: Hashes = serde_json::from_str(json)
            .map_err(|e| CacheError::Store(format!("Invalid cache snapshot: {}", e)))?;

        Ok(Self {
            hashes: Arc::new(RwLock::new(hashes)),
        })
    }

    /// Load a JSON snapshot from disk
    pub fn from_snapshot_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CacheError::Store(format!("Failed to read snapshot {}: {}", path.display(), e))
        })?;
        Self::from_snapshot_json(&json)
    }

    /// Serialize the current contents in snapshot form
    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&*self.hashes.read())
            .map_err(|e| CacheError::Store(e.to_string()))
    }

    /// Number of fields stored in hash `key`
    pub fn len(&self, key: &str) -> usize {
        self.hashes.read().get(key).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.read().values().all(HashMap::is_empty)
    }
}

impl CacheStore for MemoryStore {
    fn hget(&self, key: &str, field: &str) -> Result<Option<String>> {
        Ok(self
            .hashes
            .read()
            .get(key)
            .and_then(|hash| hash.get(field))
            .cloned())
    }

    fn hset(&self, key: &str, field: &str, value: &str) -> Result<()> {
        self.hashes
            .write()
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }
}
