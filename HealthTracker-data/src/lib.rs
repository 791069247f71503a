// HealthTracker Data
// This crate owns the persisted slots behind the entry store and water counter

// Storage configuration
pub mod config;

// SQLite connection management
#[cfg(feature = "sqlite")]
pub mod database;

// Preference store trait and backends
pub mod repository;

// Persisted slot layouts
pub mod models;

pub use config::{StorageBackend, StorageConfig};
pub use repository::{open_storage, InMemoryStorage, PreferenceStore, StorageError};
#[cfg(feature = "sqlite")]
pub use repository::SqliteStorage;
