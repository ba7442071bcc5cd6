//! Local Snapshot Cache
//!
//! Last-known-good copies of server responses, kept in a key/value store
//! (browser `localStorage`, a directory on native hosts, memory in tests).
//! Snapshots are written after every successful fetch and read only when a
//! fetch fails. They never expire.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors from a snapshot store backend
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// No backing store, quota exceeded, access denied
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Raw string key/value persistence.
///
/// A write either replaces the whole value or leaves the previous one intact.
pub trait SnapshotStore {
    fn read(&self, key: &str) -> CacheResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> CacheResult<()>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for std::rc::Rc<S> {
    fn read(&self, key: &str) -> CacheResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> CacheResult<()> {
        (**self).write(key, value)
    }
}

/// Named snapshot slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Expenses,
    Summary,
}

impl Slot {
    pub fn key(&self) -> &'static str {
        match self {
            Slot::Expenses => "expenses",
            Slot::Summary => "summary",
        }
    }
}

/// JSON view over a [`SnapshotStore`]
pub struct SnapshotCache<S> {
    store: S,
}

impl<S: SnapshotStore> SnapshotCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decoded snapshot, or `None` when missing, empty or unreadable.
    pub fn load<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let raw = match self.store.read(slot.key()) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return None,
            Err(e) => {
                tracing::warn!(slot = slot.key(), error = %e, "Snapshot read failed");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => {
                tracing::debug!(slot = slot.key(), "Snapshot cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(slot = slot.key(), error = %e, "Discarding malformed snapshot");
                None
            }
        }
    }

    /// Decoded snapshot or `fallback`; never fails.
    pub fn get<T: DeserializeOwned>(&self, slot: Slot, fallback: T) -> T {
        self.load(slot).unwrap_or(fallback)
    }

    /// Persist `value` as the slot's snapshot.
    pub fn set<T: Serialize + ?Sized>(&self, slot: Slot, value: &T) -> CacheResult<()> {
        let raw = serde_json::to_string(value)?;
        self.store.write(slot.key(), &raw)
    }
}
