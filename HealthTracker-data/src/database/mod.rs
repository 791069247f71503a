//! SQLite connection pooling for the preference store
//!
//! Pools are built with `r2d2` over `r2d2_sqlite`. Every pool handed out by
//! this module has the `preferences` schema in place.

use std::fs;
use std::path::Path;
use std::time::Duration;
use rusqlite::OpenFlags;
use tracing::info;

use crate::config::StorageConfig;
use crate::repository::StorageError;

mod schema;

pub use schema::ensure_schema;

/// SQLite connection pool
pub type SqlitePool = r2d2::Pool<r2d2_sqlite::SqliteConnectionManager>;

/// Create a pool over the database file named in `config`
pub fn create_sqlite_pool(config: &StorageConfig) -> Result<SqlitePool, StorageError> {
    let path = config.sqlite_path.as_path();
    info!("Initializing SQLite preference store at: {}", path.display());

    if config.pool_size == 0 || config.timeout_seconds == 0 {
        return Err(StorageError::Config(format!(
            "pool size and timeout must be positive (pool_size={}, timeout_seconds={})",
            config.pool_size, config.timeout_seconds
        )));
    }

    ensure_parent_dir(path)?;

    let manager = r2d2_sqlite::SqliteConnectionManager::file(path)
        .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE);

    let pool = r2d2::Pool::builder()
        .max_size(config.pool_size)
        .connection_timeout(Duration::from_secs(config.timeout_seconds))
        .build(manager)?;

    let conn = pool.get()?;
    ensure_schema(&conn)?;

    info!("SQLite connection pool created successfully");
    Ok(pool)
}

/// Create a private in-memory database.
///
/// Each SQLite in-memory connection is its own database, so the pool is
/// capped at a single connection that is never recycled.
pub fn create_in_memory_pool() -> Result<SqlitePool, StorageError> {
    info!("Initializing in-memory SQLite preference store");

    let manager = r2d2_sqlite::SqliteConnectionManager::memory();
    let pool = r2d2::Pool::builder()
        .max_size(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .build(manager)?;

    let conn = pool.get()?;
    ensure_schema(&conn)?;

    Ok(pool)
}

fn ensure_parent_dir(path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            info!("Creating parent directory: {:?}", parent);
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
