use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// Domain model for a single health measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    /// Unique identifier, only used for list identity
    pub id: Uuid,

    /// Calendar date of the observation
    pub date: NaiveDate,

    /// Name of the measured quantity, e.g. a bloodwork test name
    pub category: String,

    /// Measured value
    pub value: f64,

    /// Measurement unit, never checked against the category
    pub unit: String,

    /// Optional free-text annotation
    pub notes: Option<String>,
}

impl HealthRecord {
    /// Create a record with a freshly generated identifier
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        value: f64,
        unit: impl Into<String>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            category: category.into(),
            value,
            unit: unit.into(),
            notes,
        }
    }
}

/// Errors raised at the input boundary, before the entry store is touched
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// A required field is missing
    #[error("Validation error: {0}")]
    Validation(String),

    /// The value field does not hold a finite number
    #[error("Value must be a number, got {0:?}")]
    InvalidNumber(String),
}

/// Raw contents of the add-entry form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntryDraft {
    /// Date picked by the user
    pub date: NaiveDate,

    /// Test name as typed
    #[validate(length(min = 1, message = "Test name is required"))]
    pub test_name: String,

    /// Value as typed; parsed on submit
    pub value: String,

    /// Unit as typed
    #[validate(length(min = 1, message = "Unit is required"))]
    pub unit: String,

    /// Notes as typed; empty means none
    #[serde(default)]
    pub notes: String,
}

impl EntryDraft {
    /// Create an empty draft for the given date
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            test_name: String::new(),
            value: String::new(),
            unit: String::new(),
            notes: String::new(),
        }
    }

    /// Check the draft and turn it into an entry ready to be stored
    pub fn parse(&self) -> Result<NewEntry, InputError> {
        if let Err(validation_errors) = Validate::validate(self) {
            let mut messages: Vec<String> = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors
                        .iter()
                        .map(|err| match &err.message {
                            Some(msg) => msg.to_string(),
                            None => format!("Invalid {}", field),
                        })
                        .collect();
                    format!("{}: {}", field, error_msgs.join(", "))
                })
                .collect();
            messages.sort();

            return Err(InputError::Validation(messages.join("; ")));
        }

        let value = parse_value(&self.value)?;
        let notes = if self.notes.is_empty() {
            None
        } else {
            Some(self.notes.clone())
        };

        Ok(NewEntry {
            date: self.date,
            category: self.test_name.clone(),
            value,
            unit: self.unit.clone(),
            notes,
        })
    }

    /// Whether the add action should be enabled for the current draft
    pub fn can_submit(&self) -> bool {
        self.parse().is_ok()
    }
}

/// A checked entry that has not been assigned an identifier yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub category: String,
    pub value: f64,
    pub unit: String,
    pub notes: Option<String>,
}

impl NewEntry {
    /// Assign a fresh identifier
    pub fn into_record(self) -> HealthRecord {
        HealthRecord::new(self.date, self.category, self.value, self.unit, self.notes)
    }
}

fn parse_value(raw: &str) -> Result<f64, InputError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(InputError::InvalidNumber(raw.to_string())),
    }
}
