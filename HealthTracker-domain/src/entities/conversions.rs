use chrono::NaiveDate;
use uuid::Uuid;

use health_tracker_data::models::StoredHealthRecord;
use crate::entities::health_record::HealthRecord;

// Conversion functions between domain entities and data models
// These functions follow the pattern convert_to_[target_layer]_[model_name]

/// Date layout used in the entries slot
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Helper function to safely parse a string ID to UUID
pub fn parse_string_to_uuid(id: &str) -> Result<Uuid, String> {
    Uuid::parse_str(id).map_err(|_| format!("Invalid UUID format: {}", id))
}

/// Helper function to parse a stored calendar date
pub fn parse_stored_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, STORED_DATE_FORMAT)
        .map_err(|_| format!("Invalid date format: {}", date))
}

/// Convert from data model to domain entity for a health record
pub fn convert_to_domain_record(data_record: StoredHealthRecord) -> Result<HealthRecord, String> {
    Ok(HealthRecord {
        id: parse_string_to_uuid(&data_record.id)?,
        date: parse_stored_date(&data_record.date)?,
        category: data_record.test_name,
        value: data_record.value,
        unit: data_record.unit,
        notes: data_record.notes,
    })
}

/// Convert from domain entity to data model for a health record
pub fn convert_to_data_record(domain_record: &HealthRecord) -> StoredHealthRecord {
    StoredHealthRecord {
        id: domain_record.id.to_string(),
        date: domain_record.date.format(STORED_DATE_FORMAT).to_string(),
        test_name: domain_record.category.clone(),
        value: domain_record.value,
        unit: domain_record.unit.clone(),
        notes: domain_record.notes.clone(),
    }
}
