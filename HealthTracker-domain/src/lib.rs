// HealthTracker Domain
// This crate contains the state containers behind the health tracker screens

// Domain entities
pub mod entities;

// Entry store, water counter and derived statistics
pub mod services;

// Application configuration
pub mod config;

// Tracing bootstrap
pub mod logging;

// Re-export the storage layer for convenience
pub use health_tracker_data as data;

// Testing utilities - only available in tests or with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;

pub use config::{AppConfig, ConfigError, WaterSettings};
pub use entities::{AmountPolicy, EntryDraft, HealthRecord, InputError, ResetConfirmation, WaterTotal};
pub use services::{CategorySummary, EntryStore, SubscriptionId, TrendPoint, WaterCounter, WaterError};
