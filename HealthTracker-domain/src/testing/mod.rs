// Testing utilities for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

// Re-export storage fakes from the data layer
pub use health_tracker_data::repository::testing::FailingStorage;

use chrono::NaiveDate;
use health_tracker_data::InMemoryStorage;

use crate::entities::health_record::HealthRecord;
use crate::services::entry_store::EntryStore;

/// Build a record with a fixed unit and no notes
pub fn sample_record(category: &str, date: NaiveDate, value: f64) -> HealthRecord {
    HealthRecord::new(date, category, value, "mg/dL", None)
}

/// Create an entry store over fresh in-memory storage holding `records`.
///
/// The storage handle is returned as well so tests can inspect or reload it.
pub fn seeded_entry_store(records: Vec<HealthRecord>) -> (EntryStore<InMemoryStorage>, InMemoryStorage) {
    let storage = InMemoryStorage::new();
    let mut store = EntryStore::new(storage.clone());
    for record in records {
        store.append(record);
    }
    (store, storage)
}
