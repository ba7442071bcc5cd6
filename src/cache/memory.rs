use std::cell::RefCell;
use std::collections::HashMap;

use super::{CacheError, CacheResult, SnapshotStore};

/// In-process store; single-threaded like the UI it stands in for.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes, like `localStorage` over quota
    pub fn read_only() -> Self {
        Self {
            entries: RefCell::default(),
            read_only: true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SnapshotStore for MemoryStore {
    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> CacheResult<()> {
        if self.read_only {
            return Err(CacheError::Unavailable("store is read-only".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
