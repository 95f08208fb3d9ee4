//! Scheduling-delta feature and delay label derivation

use crate::error::{DelayError, Result};
use chrono::NaiveDateTime;
use tracing::warn;

/// Timestamp layout of the scheduled and actual departure columns
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Departures later than this many minutes are labelled as delayed
pub const DELAY_THRESHOLD_MINUTES: f64 = 15.0;

/// Early departures beyond this many seconds are reported as suspicious
pub const EARLY_DEPARTURE_TOLERANCE_SECS: i64 = 3600;

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map_err(|e| DelayError::Parse(format!("invalid timestamp '{}': {}", value, e)))
}

/// Signed minutes between scheduled and actual departure.
///
/// Negative values mean the flight left early. A departure more than an hour
/// ahead of schedule is logged but still returned.
pub fn minutes_difference(scheduled: &str, actual: &str) -> Result<f64> {
    let scheduled_at = parse_timestamp(scheduled)?;
    let actual_at = parse_timestamp(actual)?;

    let delta_secs = (actual_at - scheduled_at).num_seconds();
    if -delta_secs > EARLY_DEPARTURE_TOLERANCE_SECS {
        warn!(
            scheduled = %scheduled_at,
            actual = %actual_at,
            early_by_secs = -delta_secs,
            "Found flight leaving way before departure time"
        );
    }

    Ok(delta_secs as f64 / 60.0)
}

/// Binary delay label for a scheduling delta
pub fn delay_label(minutes: f64) -> u8 {
    u8::from(minutes > DELAY_THRESHOLD_MINUTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_departure() {
        let minutes = minutes_difference("2017-01-01 06:30:00", "2017-01-01 09:30:00").unwrap();
        assert_eq!(minutes, 180.0);
    }

    #[test]
    fn test_on_time_departure() {
        let minutes = minutes_difference("2017-01-01 06:30:00", "2017-01-01 06:30:00").unwrap();
        assert_eq!(minutes, 0.0);
    }

    #[test]
    fn test_early_departure_keeps_sign() {
        let minutes = minutes_difference("2017-01-01 09:30:00", "2017-01-01 07:15:00").unwrap();
        assert_eq!(minutes, -135.0);
    }

    #[test]
    fn test_crosses_midnight() {
        let minutes = minutes_difference("2017-01-01 23:50:00", "2017-01-02 00:20:30").unwrap();
        assert_eq!(minutes, 30.5);
    }

    #[test]
    fn test_malformed_timestamp() {
        let err = minutes_difference("2017-01-01T06:30:00", "2017-01-01 09:30:00").unwrap_err();
        assert!(matches!(err, DelayError::Parse(_)));

        let err = minutes_difference("2017-01-01 06:30:00", "").unwrap_err();
        assert!(matches!(err, DelayError::Parse(_)));
    }

    #[test]
    fn test_trailing_characters_are_rejected() {
        let err = minutes_difference("2017-01-01 06:30:00 ", "2017-01-01 09:30:00").unwrap_err();
        assert!(matches!(err, DelayError::Parse(_)));

        let err = minutes_difference("2017-01-01 06:30:00", "2017-01-01 09:30:00\n").unwrap_err();
        assert!(matches!(err, DelayError::Parse(_)));
    }

    #[test]
    fn test_delay_label_threshold() {
        assert_eq!(delay_label(15.0), 0);
        assert_eq!(delay_label(15.5), 1);
        assert_eq!(delay_label(-135.0), 0);
        assert_eq!(delay_label(180.0), 1);
    }
}
