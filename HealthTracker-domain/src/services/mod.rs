pub mod entry_store;
pub mod insights;
pub mod listeners;
pub mod water_counter;

// Domain services
// State containers driving the presentation layer, plus the statistics they expose.

pub use entry_store::EntryStore;
pub use insights::{CategorySummary, TrendPoint};
pub use listeners::SubscriptionId;
pub use water_counter::{WaterCounter, WaterError};
