use tracing::{debug, error, warn};

use health_tracker_data::models::{decode_entries, encode_entries, ENTRIES_KEY};
use health_tracker_data::PreferenceStore;

use crate::entities::conversions;
use crate::entities::health_record::{EntryDraft, HealthRecord, InputError};
use crate::services::insights::{self, CategorySummary, TrendPoint};
use crate::services::listeners::{Listeners, SubscriptionId};

/// Ordered collection of health records mirrored to a persisted slot.
///
/// The collection is loaded once on construction and rewritten in full after
/// every append. Insertion order is preserved; records are never sorted, edited
/// or removed.
#[derive(Debug)]
pub struct EntryStore<S: PreferenceStore> {
    storage: S,
    entries: Vec<HealthRecord>,
    listeners: Listeners<[HealthRecord]>,
}

impl<S: PreferenceStore> EntryStore<S> {
    /// Create a store and load any previously persisted entries
    pub fn new(storage: S) -> Self {
        let entries = Self::load(&storage);
        Self {
            storage,
            entries,
            listeners: Listeners::new(),
        }
    }

    /// Read the entries slot; anything unreadable counts as no prior data
    fn load(storage: &S) -> Vec<HealthRecord> {
        let bytes = match storage.read(ENTRIES_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No persisted entries found, starting empty");
                return Vec::new();
            },
            Err(e) => {
                warn!("Failed to read persisted entries ({}), starting empty", e);
                return Vec::new();
            }
        };

        let stored = match decode_entries(&bytes) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to decode persisted entries ({}), starting empty", e);
                return Vec::new();
            }
        };

        match stored
            .into_iter()
            .map(conversions::convert_to_domain_record)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(entries) => {
                debug!("Loaded {} persisted entries", entries.len());
                entries
            },
            Err(e) => {
                warn!("Persisted entries are malformed ({}), starting empty", e);
                Vec::new()
            }
        }
    }

    /// Append a record and persist the whole collection.
    ///
    /// The record is not validated here; use `submit` for raw form input.
    pub fn append(&mut self, record: HealthRecord) {
        debug!("Appending entry {} ({})", record.id, record.category);
        self.entries.push(record);
        self.persist();
        self.listeners.notify(&self.entries);
    }

    /// Validate a form draft, then append the resulting record
    pub fn submit(&mut self, draft: &EntryDraft) -> Result<HealthRecord, InputError> {
        let record = draft.parse()?.into_record();
        self.append(record.clone());
        Ok(record)
    }

    /// Overwrite the entries slot with the current collection.
    ///
    /// Failures are logged and otherwise ignored; the in-memory collection
    /// stays authoritative for the rest of the process.
    pub fn persist(&self) {
        let stored: Vec<_> = self.entries.iter().map(conversions::convert_to_data_record).collect();

        let bytes = match encode_entries(&stored) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to encode entries, change not persisted: {}", e);
                return;
            }
        };

        match self.storage.write(ENTRIES_KEY, &bytes) {
            Ok(()) => debug!("Persisted {} entries", self.entries.len()),
            Err(e) => error!("Failed to persist entries: {}", e),
        }
    }

    /// All records in entry order
    pub fn entries(&self) -> &[HealthRecord] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Mean value of the records whose category equals `category` exactly
    pub fn average_value(&self, category: &str) -> Option<f64> {
        insights::average_value(&self.entries, category)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        insights::categories(&self.entries)
    }

    /// Records of `category` as date-ordered trend points
    pub fn trend(&self, category: &str) -> Vec<TrendPoint> {
        insights::trend(&self.entries, category)
    }

    /// Summary statistics for `category`
    pub fn summary(&self, category: &str) -> Option<CategorySummary> {
        insights::summarize(&self.entries, category)
    }

    /// Register a listener called with the full collection after each append
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&[HealthRecord]) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    /// Remove a listener
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// The backing storage
    pub fn storage(&self) -> &S {
        &self.storage
    }
}
