// Persisted slot layouts
pub mod health_record;
pub mod water_intake;

pub use health_record::{decode_entries, encode_entries, StoredHealthRecord};
pub use water_intake::{decode_total, encode_total};

/// Slot holding the JSON array of bloodwork entries
pub const ENTRIES_KEY: &str = "bloodworkEntries";

/// Slot holding the running water intake total
pub const WATER_TOTAL_KEY: &str = "totalWaterIntake";
