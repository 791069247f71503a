use serde::ser::Error as _;
use serde::{Deserialize, Serialize};

/// Storage model for a single health record.
///
/// This is the on-disk layout of one element of the entries slot. Identifiers
/// and dates are kept as strings here; the domain layer parses them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredHealthRecord {
    /// Unique identifier for the record
    pub id: String,

    /// Calendar date of the observation (`YYYY-MM-DD`)
    pub date: String,

    /// Name of the measured quantity
    #[serde(rename = "testName", alias = "category")]
    pub test_name: String,

    /// Measured value
    pub value: f64,

    /// Measurement unit
    pub unit: String,

    /// Optional notes about the record
    #[serde(default)]
    pub notes: Option<String>,
}

/// Encode a full collection of records for the entries slot.
///
/// Fails when any value is non-finite, since JSON would silently turn it into `null`.
pub fn encode_entries(records: &[StoredHealthRecord]) -> Result<Vec<u8>, serde_json::Error> {
    if let Some(bad) = records.iter().find(|record| !record.value.is_finite()) {
        return Err(serde_json::Error::custom(format!(
            "record {} has non-finite value {}",
            bad.id, bad.value
        )));
    }
    serde_json::to_vec(records)
}

/// Decode the entries slot
pub fn decode_entries(bytes: &[u8]) -> Result<Vec<StoredHealthRecord>, serde_json::Error> {
    serde_json::from_slice(bytes)
}
