//! Derived statistics over the entry collection
//!
//! Categories are matched by exact, case-sensitive string equality. No
//! trimming or case folding is applied.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::entities::health_record::HealthRecord;

/// One point of a category's trend listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub unit: String,
}

impl From<&HealthRecord> for TrendPoint {
    fn from(record: &HealthRecord) -> Self {
        Self {
            date: record.date,
            value: record.value,
            unit: record.unit.clone(),
        }
    }
}

/// Summary statistics for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category the summary covers
    pub category: String,

    /// Number of matching records
    pub count: usize,

    /// Arithmetic mean of the values
    pub mean: f64,

    /// Lowest recorded value
    pub min: f64,

    /// Highest recorded value
    pub max: f64,

    /// Record with the latest date; on equal dates, the one entered last
    pub latest: TrendPoint,
}

fn matching<'a>(records: &'a [HealthRecord], category: &'a str) -> impl Iterator<Item = &'a HealthRecord> + 'a {
    records.iter().filter(move |record| record.category == category)
}

/// Mean value of the records in `category`, or `None` when there are none
pub fn average_value(records: &[HealthRecord], category: &str) -> Option<f64> {
    let values: Vec<f64> = matching(records, category).map(|record| record.value).collect();
    mean(&values)
}

// Falls back to scaling each value first when the plain sum overflows
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let count = values.len() as f64;
    let sum: f64 = values.iter().sum();
    if sum.is_finite() {
        Some(sum / count)
    } else {
        Some(values.iter().map(|value| value / count).sum())
    }
}

/// Distinct categories in the order they were first entered
pub fn categories(records: &[HealthRecord]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for record in records {
        if !seen.iter().any(|category| *category == record.category) {
            seen.push(record.category.clone());
        }
    }
    seen
}

/// Points of `category` ordered by date; records on the same date keep entry order
pub fn trend(records: &[HealthRecord], category: &str) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = matching(records, category).map(TrendPoint::from).collect();
    points.sort_by_key(|point| point.date);
    points
}

/// Count, mean, min, max and latest point of `category`
pub fn summarize(records: &[HealthRecord], category: &str) -> Option<CategorySummary> {
    let mut values = Vec::new();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut latest: Option<&HealthRecord> = None;

    for record in matching(records, category) {
        values.push(record.value);
        min = min.min(record.value);
        max = max.max(record.value);

        latest = match latest {
            Some(current) if current.date > record.date => Some(current),
            _ => Some(record),
        };
    }

    let latest = latest?;
    let average = mean(&values)?;

    Some(CategorySummary {
        category: category.to_string(),
        count: values.len(),
        mean: average,
        min,
        max,
        latest: TrendPoint::from(latest),
    })
}
