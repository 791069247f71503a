//! Application configuration
//!
//! Wraps the storage configuration from the data layer and adds the water
//! counter settings. Values come from the environment (and a `.env` file when
//! present).

use std::env;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use health_tracker_data::config::parse_or_default;
use health_tracker_data::{open_storage, PreferenceStore, StorageConfig, StorageError};

use crate::entities::water::AmountPolicy;

/// Environment variable holding the default serving size in millilitres
pub const WATER_SERVING_VAR: &str = "HEALTH_TRACKER_WATER_SERVING_ML";
/// Environment variable selecting the water amount policy
pub const WATER_POLICY_VAR: &str = "HEALTH_TRACKER_WATER_POLICY";

/// Serving logged by one press of the add button
pub const DEFAULT_SERVING_ML: f64 = 250.0;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting holds a value that cannot be used
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    /// Storage configuration or opening failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Water counter settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterSettings {
    /// Which increments are accepted
    pub policy: AmountPolicy,
    /// Amount added by `log_default_serving`
    pub serving_ml: f64,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            policy: AmountPolicy::AllowAny,
            serving_ml: DEFAULT_SERVING_ML,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub water: WaterSettings,
}

impl AppConfig {
    /// Load configuration from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage = StorageConfig::from_lookup(&lookup)?;

        let policy = match lookup(WATER_POLICY_VAR) {
            Some(raw) => raw.parse::<AmountPolicy>().map_err(|_| ConfigError::InvalidValue {
                key: WATER_POLICY_VAR.to_string(),
                value: raw.clone(),
            })?,
            None => AmountPolicy::default(),
        };

        let serving_ml = parse_or_default(&lookup, WATER_SERVING_VAR, DEFAULT_SERVING_ML);
        if !policy.accepts(serving_ml) {
            return Err(ConfigError::InvalidValue {
                key: WATER_SERVING_VAR.to_string(),
                value: serving_ml.to_string(),
            });
        }

        info!("Water settings: policy={}, serving={}ml", policy, serving_ml);

        Ok(Self {
            storage,
            water: WaterSettings { policy, serving_ml },
        })
    }

    /// Open the configured storage backend
    pub fn open_storage(&self) -> Result<Arc<dyn PreferenceStore + Send + Sync>, ConfigError> {
        Ok(open_storage(&self.storage)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use health_tracker_data::StorageBackend;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.water.serving_ml, 250.0);
        assert_eq!(config.water.policy, AmountPolicy::AllowAny);
    }

    #[test]
    fn test_water_settings_from_lookup() {
        let config = AppConfig::from_lookup(|key| match key {
            WATER_POLICY_VAR => Some("positive-only".to_string()),
            WATER_SERVING_VAR => Some("330".to_string()),
            "HEALTH_TRACKER_STORAGE" => Some("memory".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.water.policy, AmountPolicy::PositiveOnly);
        assert_eq!(config.water.serving_ml, 330.0);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let result = AppConfig::from_lookup(|key| {
            (key == WATER_POLICY_VAR).then(|| "sometimes".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_serving_must_satisfy_policy() {
        let result = AppConfig::from_lookup(|key| match key {
            WATER_POLICY_VAR => Some("positive-only".to_string()),
            WATER_SERVING_VAR => Some("-250".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_storage_errors_are_wrapped() {
        let result = AppConfig::from_lookup(|key| {
            (key == "HEALTH_TRACKER_STORAGE").then(|| "cloud".to_string())
        });
        assert!(matches!(result, Err(ConfigError::Storage(StorageError::Config(_)))));
    }

    #[test]
    fn test_zero_timeout_is_rejected_before_opening() {
        let result = AppConfig::from_lookup(|key| match key {
            "HEALTH_TRACKER_STORAGE" => Some("sqlite".to_string()),
            "HEALTH_TRACKER_TIMEOUT_SECONDS" => Some("0".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::Storage(StorageError::Config(_)))));
    }

    #[test]
    fn test_open_memory_storage() {
        let config = AppConfig {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                ..StorageConfig::default()
            },
            ..AppConfig::default()
        };

        let storage = config.open_storage().unwrap();
        assert_eq!(storage.read("totalWaterIntake").unwrap(), None);
    }
}
