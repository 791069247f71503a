use std::sync::PoisonError;
use thiserror::Error;

/// Error type for persisted slot operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite error
    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[cfg(feature = "sqlite")]
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// Filesystem error while preparing the storage location
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage configuration error
    #[error("Storage configuration error: {0}")]
    Config(String),
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(error: PoisonError<T>) -> Self {
        StorageError::Lock(error.to_string())
    }
}
