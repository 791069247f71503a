use thiserror::Error;
use tracing::{debug, error, warn};

use health_tracker_data::models::{decode_total, encode_total, WATER_TOTAL_KEY};
use health_tracker_data::PreferenceStore;

use crate::config::WaterSettings;
use crate::entities::water::{AmountPolicy, ResetConfirmation, WaterTotal};
use crate::services::listeners::{Listeners, SubscriptionId};

/// Water counter errors
#[derive(Debug, Error, PartialEq)]
pub enum WaterError {
    /// The increment is not allowed under the configured policy
    #[error("Invalid water amount: {0}")]
    InvalidAmount(f64),
}

/// Running water intake total mirrored to a persisted slot.
///
/// The persisted value is read when the counter is first activated, not at
/// construction. Mutations activate the counter first so an earlier total is
/// never overwritten.
#[derive(Debug)]
pub struct WaterCounter<S: PreferenceStore> {
    storage: S,
    total: f64,
    active: bool,
    settings: WaterSettings,
    listeners: Listeners<WaterTotal>,
}

impl<S: PreferenceStore> WaterCounter<S> {
    /// Create an inactive counter with default settings
    pub fn new(storage: S) -> Self {
        Self::with_settings(storage, WaterSettings::default())
    }

    /// Create an inactive counter with explicit settings
    pub fn with_settings(storage: S, settings: WaterSettings) -> Self {
        Self {
            storage,
            total: 0.0,
            active: false,
            settings,
            listeners: Listeners::new(),
        }
    }

    /// Load the persisted total on first call; later calls are no-ops
    pub fn activate(&mut self) -> WaterTotal {
        if !self.active {
            self.total = self.load();
            self.active = true;
        }
        self.total()
    }

    fn load(&self) -> f64 {
        match self.storage.read(WATER_TOTAL_KEY) {
            Ok(Some(bytes)) => match decode_total(&bytes) {
                Ok(total) => {
                    debug!("Loaded water total {}", total);
                    total
                },
                Err(e) => {
                    warn!("Failed to decode water total ({}), starting at zero", e);
                    0.0
                }
            },
            Ok(None) => 0.0,
            Err(e) => {
                warn!("Failed to read water total ({}), starting at zero", e);
                0.0
            }
        }
    }

    /// Add `amount` millilitres and persist the new total
    pub fn add(&mut self, amount: f64) -> Result<WaterTotal, WaterError> {
        if !self.settings.policy.accepts(amount) {
            return Err(WaterError::InvalidAmount(amount));
        }

        self.activate();
        let total = self.total + amount;
        if !total.is_finite() {
            return Err(WaterError::InvalidAmount(amount));
        }

        self.total = total;
        self.commit();
        Ok(self.total())
    }

    /// Add one default serving
    pub fn log_default_serving(&mut self) -> Result<WaterTotal, WaterError> {
        self.add(self.settings.serving_ml)
    }

    /// Set the total back to zero and persist it.
    ///
    /// The returned confirmation is meant to be shown once and is not stored.
    pub fn reset(&mut self) -> ResetConfirmation {
        self.activate();
        self.total = 0.0;
        self.commit();
        ResetConfirmation::default()
    }

    fn commit(&mut self) {
        self.persist();
        let total = self.total();
        self.listeners.notify(&total);
    }

    /// Overwrite the slot with the current total; failures are logged only
    pub fn persist(&self) {
        let bytes = match encode_total(self.total) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to encode water total, change not persisted: {}", e);
                return;
            }
        };

        match self.storage.write(WATER_TOTAL_KEY, &bytes) {
            Ok(()) => debug!("Persisted water total {}", self.total),
            Err(e) => error!("Failed to persist water total: {}", e),
        }
    }

    /// Current total
    pub fn total(&self) -> WaterTotal {
        WaterTotal(self.total)
    }

    /// Whether the persisted total has been loaded
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The increment policy in force
    pub fn policy(&self) -> AmountPolicy {
        self.settings.policy
    }

    /// Register a listener called with the new total after each mutation
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&WaterTotal) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use health_tracker_data::InMemoryStorage;
    use crate::testing::FailingStorage;

    #[test]
    fn test_fresh_counter_scenario() {
        let mut counter = WaterCounter::new(InMemoryStorage::new());
        assert_eq!(counter.activate(), WaterTotal::ZERO);

        assert_eq!(counter.add(250.0).unwrap(), WaterTotal(250.0));
        assert_eq!(counter.add(250.0).unwrap(), WaterTotal(500.0));

        counter.reset();
        assert_eq!(counter.total(), WaterTotal::ZERO);
    }

    #[test]
    fn test_total_is_loaded_on_activation_not_construction() {
        let storage = InMemoryStorage::with_slot(WATER_TOTAL_KEY, "750.0");
        let mut counter = WaterCounter::new(storage.clone());

        assert!(!counter.is_active());
        assert_eq!(counter.total(), WaterTotal::ZERO);

        assert_eq!(counter.activate(), WaterTotal(750.0));
        storage.write(WATER_TOTAL_KEY, b"1.0").unwrap();
        assert_eq!(counter.activate(), WaterTotal(750.0));
    }

    #[test]
    fn test_add_before_activation_builds_on_persisted_total() {
        let storage = InMemoryStorage::with_slot(WATER_TOTAL_KEY, "500");
        let mut counter = WaterCounter::new(storage.clone());

        assert_eq!(counter.add(250.0).unwrap(), WaterTotal(750.0));
        assert_eq!(storage.read(WATER_TOTAL_KEY).unwrap(), Some(b"750.0".to_vec()));
    }

    #[test]
    fn test_add_is_associative() {
        let mut split = WaterCounter::new(InMemoryStorage::new());
        split.add(125.0).unwrap();
        split.add(375.0).unwrap();

        let mut single = WaterCounter::new(InMemoryStorage::new());
        single.add(500.0).unwrap();

        assert_eq!(split.total(), single.total());
    }

    #[test]
    fn test_log_default_serving_uses_configured_amount() {
        let settings = WaterSettings {
            serving_ml: 330.0,
            ..WaterSettings::default()
        };
        let mut counter = WaterCounter::with_settings(InMemoryStorage::new(), settings);

        counter.log_default_serving().unwrap();
        assert_eq!(counter.total(), WaterTotal(330.0));
    }

    #[test]
    fn test_allow_any_policy_accepts_negative_amounts() {
        let mut counter = WaterCounter::new(InMemoryStorage::new());
        counter.add(250.0).unwrap();
        assert_eq!(counter.add(-100.0).unwrap(), WaterTotal(150.0));
        assert!(matches!(counter.add(f64::NAN), Err(WaterError::InvalidAmount(v)) if v.is_nan()));
        assert_eq!(counter.total(), WaterTotal(150.0));
    }

    #[test]
    fn test_positive_only_policy_leaves_state_untouched() {
        let storage = InMemoryStorage::new();
        let settings = WaterSettings {
            policy: AmountPolicy::PositiveOnly,
            ..WaterSettings::default()
        };
        let mut counter = WaterCounter::with_settings(storage.clone(), settings);
        counter.add(250.0).unwrap();

        assert_eq!(counter.add(0.0), Err(WaterError::InvalidAmount(0.0)));
        assert_eq!(counter.add(-50.0), Err(WaterError::InvalidAmount(-50.0)));
        assert_eq!(counter.total(), WaterTotal(250.0));
        assert_eq!(storage.read(WATER_TOTAL_KEY).unwrap(), Some(b"250.0".to_vec()));
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let storage = InMemoryStorage::new();
        let mut counter = WaterCounter::new(storage.clone());
        counter.add(f64::MAX).unwrap();

        assert_eq!(counter.add(f64::MAX), Err(WaterError::InvalidAmount(f64::MAX)));
        assert_eq!(counter.total(), WaterTotal(f64::MAX));
        let persisted = storage.read(WATER_TOTAL_KEY).unwrap().unwrap();
        assert_eq!(decode_total(&persisted).unwrap(), f64::MAX);
    }

    #[test]
    fn test_reset_returns_confirmation() {
        let mut counter = WaterCounter::new(InMemoryStorage::new());
        counter.add(250.0).unwrap();

        let confirmation = counter.reset();
        assert_eq!(confirmation.title, "Water Intake Reset");
        assert_eq!(confirmation.message, "Your daily water intake has been reset.");
    }

    #[test]
    fn test_undecodable_total_starts_at_zero() {
        let mut counter = WaterCounter::new(InMemoryStorage::with_slot(WATER_TOTAL_KEY, "lots"));
        assert_eq!(counter.activate(), WaterTotal::ZERO);
    }

    #[test]
    fn test_write_failure_keeps_total_in_memory() {
        let mut counter = WaterCounter::new(FailingStorage::new());
        counter.add(250.0).unwrap();
        assert_eq!(counter.total(), WaterTotal(250.0));
    }

    #[test]
    fn test_listeners_receive_new_totals() {
        let mut counter = WaterCounter::new(InMemoryStorage::new());
        let totals = Rc::new(RefCell::new(Vec::new()));

        let seen = Rc::clone(&totals);
        counter.subscribe(move |total| seen.borrow_mut().push(total.millilitres()));

        counter.add(250.0).unwrap();
        counter.reset();

        assert_eq!(*totals.borrow(), vec![250.0, 0.0]);
    }
}
