//! Input validation for serving requests
//!
//! Rejects records outside the domain the classifier was trained on
//! before any encoding work is done.

use crate::error::{DelayError, Result};
use crate::models::FlightRecord;
use std::ops::RangeInclusive;

/// Accepted flight-type codes: international and national
pub const FLIGHT_TYPES: [&str; 2] = ["I", "N"];

/// Accepted month numbers
pub const MONTHS: RangeInclusive<i64> = 1..=12;

/// Reason a record was rejected
fn rejection_reason(record: &FlightRecord) -> Option<String> {
    if record.airline.is_empty() {
        return Some("airline name is empty".to_string());
    }
    if !FLIGHT_TYPES.contains(&record.flight_type.as_str()) {
        return Some(format!("unknown flight type '{}'", record.flight_type));
    }
    if !MONTHS.contains(&record.month) {
        return Some(format!("month {} outside 1-12", record.month));
    }
    None
}

/// True iff the airline is non-empty, the flight type is `I` or `N`,
/// and the month lies in 1-12.
pub fn is_valid(record: &FlightRecord) -> bool {
    rejection_reason(record).is_none()
}

/// Validate a whole batch; the first invalid record rejects all of it.
pub fn validate_batch(records: &[FlightRecord]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        if let Some(reason) = rejection_reason(record) {
            return Err(DelayError::Validation { index, reason });
        }
    }
    Ok(())
}
