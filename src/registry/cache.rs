//! Memoized reference stores
//!
//! Stores are shared as `Arc`s. Reloading a source swaps in a freshly built
//! store; readers still holding the previous `Arc` keep a consistent view.

use std::sync::{Arc, RwLock};

use arrow::record_batch::RecordBatch;
use log::debug;
use rustc_hash::FxHashMap;

use crate::error::{EngineError, Result};
use crate::registry::reference::ReferenceStore;

/// Reference stores keyed by source (usually a file path)
#[derive(Debug, Default)]
pub struct ReferenceCache {
    stores: RwLock<FxHashMap<String, Arc<ReferenceStore>>>,
}

impl ReferenceCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached store for `source`, if loaded
    #[must_use]
    pub fn get(&self, source: &str) -> Option<Arc<ReferenceStore>> {
        let stores = self.stores.read().unwrap_or_else(|e| e.into_inner());
        stores.get(source).cloned()
    }

    /// Return the cached store for `source`, loading it on first use
    ///
    /// `read_source` is only called when nothing is cached yet. Its error type
    /// only needs to absorb engine errors, so file readers can keep their own.
    pub fn get_or_load<F, E>(
        &self,
        source: &str,
        read_source: F,
    ) -> std::result::Result<Arc<ReferenceStore>, E>
    where
        F: FnOnce() -> std::result::Result<RecordBatch, E>,
        E: From<EngineError>,
    {
        if let Some(store) = self.get(source) {
            debug!("Reference store cache hit for {source}");
            return Ok(store);
        }

        let store = Arc::new(ReferenceStore::load(&read_source()?)?);
        let mut stores = self.stores.write().unwrap_or_else(|e| e.into_inner());
        // Another caller may have loaded the same source meanwhile; keep the first
        Ok(stores
            .entry(source.to_string())
            .or_insert(store)
            .clone())
    }

    /// Build a new store for `source` and replace the cached one
    pub fn reload(&self, source: &str, raw: &RecordBatch) -> Result<Arc<ReferenceStore>> {
        let store = Arc::new(ReferenceStore::load(raw)?);
        let mut stores = self.stores.write().unwrap_or_else(|e| e.into_inner());
        stores.insert(source.to_string(), store.clone());
        debug!("Reloaded reference store for {source}");
        Ok(store)
    }

    /// Drop the cached store for `source`
    pub fn evict(&self, source: &str) -> Option<Arc<ReferenceStore>> {
        let mut stores = self.stores.write().unwrap_or_else(|e| e.into_inner());
        stores.remove(source)
    }
}
