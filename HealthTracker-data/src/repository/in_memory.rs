use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::errors::StorageError;
use super::PreferenceStore;

/// In-memory storage implementation for persisted slots
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    /// Slot contents keyed by slot name
    slots: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new, empty in-memory storage
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Create a storage with one slot already written
    pub fn with_slot(key: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            slots.insert(key.to_string(), bytes.into());
        }
        storage
    }

    /// Number of slots that have been written
    pub fn slot_count(&self) -> Result<usize, StorageError> {
        let slots = self.slots.lock()?;
        Ok(slots.len())
    }
}

impl PreferenceStore for InMemoryStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let slots = self.slots.lock()?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let mut slots = self.slots.lock()?;
        slots.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Storage fakes for exercising failure paths
#[cfg(any(test, feature = "mock"))]
pub mod testing {
    use super::*;

    /// Storage whose writes always fail; reads delegate to an inner in-memory storage
    #[derive(Debug, Clone, Default)]
    pub struct FailingStorage {
        inner: InMemoryStorage,
    }

    impl FailingStorage {
        /// Create a failing storage with no slots
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a failing storage that still serves previously written data
        pub fn wrapping(inner: InMemoryStorage) -> Self {
            Self { inner }
        }
    }

    impl PreferenceStore for FailingStorage {
        fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, _bytes: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Lock(format!("write to `{}` rejected by failing storage", key)))
        }
    }
}
