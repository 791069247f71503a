//! Storage configuration for the HealthTracker application
//!
//! Configuration is read from environment variables (optionally seeded from a
//! `.env` file). Every setting has a default, so an empty environment yields a
//! SQLite store under `./data`.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

use crate::repository::StorageError;

/// Environment variable selecting the storage backend
pub const STORAGE_BACKEND_VAR: &str = "HEALTH_TRACKER_STORAGE";
/// Environment variable holding the SQLite database path
pub const SQLITE_PATH_VAR: &str = "HEALTH_TRACKER_SQLITE_PATH";
/// Environment variable holding the connection pool size
pub const POOL_SIZE_VAR: &str = "HEALTH_TRACKER_POOL_SIZE";
/// Environment variable holding the connection timeout in seconds
pub const TIMEOUT_SECONDS_VAR: &str = "HEALTH_TRACKER_TIMEOUT_SECONDS";

const DEFAULT_SQLITE_PATH: &str = "./data/health_tracker.db";
const DEFAULT_POOL_SIZE: u32 = 4;
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Supported storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// SQLite database (file-based)
    Sqlite,
    /// Process-local memory, lost on exit
    Memory,
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" | "in-memory" => Ok(StorageBackend::Memory),
            _ => Err(StorageError::Config(format!("Unsupported storage backend: {}", s))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    /// Which backend to open
    pub backend: StorageBackend,
    /// Path to the SQLite database file
    pub sqlite_path: PathBuf,
    /// Maximum number of pooled connections
    pub pool_size: u32,
    /// Connection timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            sqlite_path: PathBuf::from(DEFAULT_SQLITE_PATH),
            pool_size: DEFAULT_POOL_SIZE,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl StorageConfig {
    /// Create a storage configuration from environment variables
    pub fn from_env() -> Result<Self, StorageError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a storage configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match lookup(STORAGE_BACKEND_VAR) {
            Some(value) => value.parse::<StorageBackend>()?,
            None => defaults.backend,
        };

        let sqlite_path = lookup(SQLITE_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.sqlite_path);

        let pool_size = parse_or_default(&lookup, POOL_SIZE_VAR, defaults.pool_size);
        let timeout_seconds = parse_or_default(&lookup, TIMEOUT_SECONDS_VAR, defaults.timeout_seconds);

        if pool_size == 0 {
            return Err(StorageError::Config(format!("{} must be at least 1", POOL_SIZE_VAR)));
        }
        if timeout_seconds == 0 {
            return Err(StorageError::Config(format!("{} must be at least 1", TIMEOUT_SECONDS_VAR)));
        }

        info!(
            "Storage configuration: backend={:?}, sqlite_path={}, pool_size={}, timeout={}s",
            backend,
            sqlite_path.display(),
            pool_size,
            timeout_seconds
        );

        Ok(Self {
            backend,
            sqlite_path,
            pool_size,
            timeout_seconds,
        })
    }
}

/// Parse a numeric setting, falling back to `default` when it is absent or malformed
pub fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => value,
            Err(_) => {
                warn!("Ignoring unparseable {}={:?}, using default", key, raw);
                default
            }
        },
        None => default,
    }
}
