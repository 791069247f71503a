// Repository module structure
pub mod errors;
mod in_memory;
#[cfg(feature = "sqlite")]
mod sqlite;

use std::sync::Arc;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};

// Re-export commonly used types
pub use errors::StorageError;
pub use in_memory::InMemoryStorage;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStorage;

// Re-export failing fakes for both testing and when mock feature is enabled
#[cfg(any(test, feature = "mock"))]
pub use in_memory::testing;

/// Named-slot key-value storage.
///
/// Each slot holds one serialized value and is overwritten in full on every
/// write. Reading a slot that was never written yields `Ok(None)`.
pub trait PreferenceStore {
    /// Read the raw bytes held in `key`
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Overwrite `key` with `bytes`
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for &S {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, bytes)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, bytes)
    }
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(key, bytes)
    }
}

/// Open the storage backend selected by `config`
pub fn open_storage(config: &StorageConfig) -> Result<Arc<dyn PreferenceStore + Send + Sync>, StorageError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory preference storage");
            Ok(Arc::new(InMemoryStorage::new()))
        },
        #[cfg(feature = "sqlite")]
        StorageBackend::Sqlite => {
            let storage = SqliteStorage::open(config)?;
            Ok(Arc::new(storage))
        },
        #[cfg(not(feature = "sqlite"))]
        StorageBackend::Sqlite => Err(StorageError::Config(
            "SQLite storage requested but the `sqlite` feature is disabled".to_string(),
        )),
    }
}
