//! Process-wide store of the latest source map per file.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sourcemap::SourceMap;

/// Source maps keyed by file identity, usually the path or URI of the
/// template. Readers get a shared handle; `set` replaces the entry.
#[derive(Debug, Default)]
pub struct SourceMapCache {
    maps: Mutex<HashMap<String, Arc<SourceMap>>>,
}

impl SourceMapCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A panic while holding the lock cannot leave a half-written map, so a
    /// poisoned lock is taken over.
    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<SourceMap>>> {
        self.maps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set(&self, key: impl Into<String>, map: SourceMap) -> Arc<SourceMap> {
        let key = key.into();
        let map = Arc::new(map);
        log::trace!("caching source map for {key}");
        self.lock().insert(key, Arc::clone(&map));
        map
    }

    pub fn get(&self, key: &str) -> Option<Arc<SourceMap>> {
        self.lock().get(key).cloned()
    }

    pub fn delete(&self, key: &str) -> Option<Arc<SourceMap>> {
        self.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}
