use std::sync::Arc;

use mockall::mock;
use tempfile::TempDir;

use health_tracker_domain::data::models::WATER_TOTAL_KEY;
use health_tracker_domain::data::{InMemoryStorage, PreferenceStore, SqliteStorage, StorageConfig, StorageError};
use health_tracker_domain::{AmountPolicy, WaterCounter, WaterError, WaterSettings, WaterTotal};

mock! {
    pub Storage {}
    impl PreferenceStore for Storage {
        fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
        fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
    }
}

#[test]
fn test_reset_twice_persists_zero_both_times() {
    let mut storage = MockStorage::new();
    storage
        .expect_read()
        .withf(|key| key == WATER_TOTAL_KEY)
        .times(1)
        .returning(|_| Ok(Some(b"750.0".to_vec())));
    storage
        .expect_write()
        .withf(|key, bytes| key == WATER_TOTAL_KEY && bytes == b"0.0")
        .times(2)
        .returning(|_, _| Ok(()));

    let mut counter = WaterCounter::new(storage);
    assert_eq!(counter.activate(), WaterTotal(750.0));

    counter.reset();
    assert_eq!(counter.total(), WaterTotal::ZERO);
    counter.reset();
    assert_eq!(counter.total(), WaterTotal::ZERO);
}

#[test]
fn test_rejected_amount_never_reaches_storage() {
    let mut storage = MockStorage::new();
    storage.expect_read().times(0);
    storage.expect_write().times(0);

    let settings = WaterSettings {
        policy: AmountPolicy::PositiveOnly,
        ..WaterSettings::default()
    };
    let mut counter = WaterCounter::with_settings(storage, settings);

    assert_eq!(counter.add(-250.0), Err(WaterError::InvalidAmount(-250.0)));
    assert!(!counter.is_active());
}

#[test]
fn test_counters_sharing_storage_see_latest_total() {
    let storage = Arc::new(InMemoryStorage::new());

    let mut first = WaterCounter::new(Arc::clone(&storage));
    first.log_default_serving().unwrap();
    first.log_default_serving().unwrap();

    let mut second = WaterCounter::new(Arc::clone(&storage));
    assert_eq!(second.activate(), WaterTotal(500.0));
    assert_eq!(second.total().to_string(), "500.0 ml");
}

#[test]
fn test_total_survives_sqlite_reopen() {
    let dir = TempDir::new().unwrap();
    let config = StorageConfig {
        sqlite_path: dir.path().join("water.db"),
        ..StorageConfig::default()
    };

    {
        let mut counter = WaterCounter::new(SqliteStorage::open(&config).unwrap());
        counter.add(250.0).unwrap();
        counter.add(250.0).unwrap();
        counter.reset();
        counter.add(330.0).unwrap();
    }

    let storage = SqliteStorage::open(&config).unwrap();
    assert_eq!(storage.read(WATER_TOTAL_KEY).unwrap(), Some(b"330.0".to_vec()));

    let mut counter = WaterCounter::new(storage);
    assert_eq!(counter.activate(), WaterTotal(330.0));
}
