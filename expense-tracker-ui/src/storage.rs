//! `window.localStorage` snapshot store.

use expense_tracker::cache::{CacheError, CacheResult, SnapshotStore};
use web_sys::Storage;

/// Snapshots under their bare slot keys (`expenses`, `summary`)
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage(&self) -> CacheResult<Storage> {
        web_sys::window()
            .ok_or_else(|| CacheError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| CacheError::Unavailable("localStorage disabled".to_string()))
    }
}

impl SnapshotStore for LocalStorageStore {
    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))
    }

    fn write(&self, key: &str, value: &str) -> CacheResult<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| CacheError::Unavailable(format!("{:?}", e)))
    }
}
