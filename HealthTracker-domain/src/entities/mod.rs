// Domain entities and value objects
pub mod conversions;
pub mod health_record;
pub mod water;

// Re-export common types for easier imports
pub use health_record::{EntryDraft, HealthRecord, InputError, NewEntry};
pub use water::{AmountPolicy, ResetConfirmation, WaterTotal};
