use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

use crate::config::StorageConfig;
use crate::database::{create_in_memory_pool, create_sqlite_pool, SqlitePool};
use super::errors::StorageError;
use super::PreferenceStore;

/// SQLite-backed preference storage.
///
/// Slots live in the `preferences` table, one row per key.
#[derive(Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl std::fmt::Debug for SqliteStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStorage")
            .field("connections", &self.pool.state().connections)
            .finish()
    }
}

impl SqliteStorage {
    /// Open (or create) the database file named in `config`
    pub fn open(config: &StorageConfig) -> Result<Self, StorageError> {
        let pool = create_sqlite_pool(config)?;
        Ok(Self { pool })
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let pool = create_in_memory_pool()?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool; the schema is created if missing
    pub fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        let conn = pool.get()?;
        crate::database::ensure_schema(&conn)?;
        drop(conn);
        Ok(Self { pool })
    }

    /// Timestamp of the last write to `key`, if any
    pub fn updated_at(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self.pool.get()?;
        let updated_at = conn
            .query_row(
                "SELECT updated_at FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(updated_at)
    }
}

impl PreferenceStore for SqliteStorage {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        debug!("Reading preference slot from database: key={}", key);

        let conn = self.pool.get()?;
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get::<_, Vec<u8>>(0),
            )
            .optional()?;

        Ok(value)
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        debug!("Writing preference slot to database: key={}, bytes={}", key, bytes.len());

        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO preferences (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, bytes, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }
}
