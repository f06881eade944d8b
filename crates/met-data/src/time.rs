//! Time handling for meteorological snapshots.
//!
//! Snapshot times are carried as seconds since 2000-01-01T00:00:00Z, which is
//! the reference epoch of the trajectory-model data the tool consumes.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

use crate::error::{MetDataError, MetDataResult};

/// Unix time stamp of the snapshot epoch (2000-01-01T00:00:00Z).
pub const EPOCH_UNIX_SECONDS: i64 = 946_684_800;

/// Convert seconds since the epoch to a UTC date/time.
///
/// Returns `None` for times outside chrono's representable range.
pub fn seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    let millis = (seconds * 1000.0).round() as i64;
    DateTime::<Utc>::from_timestamp_millis(EPOCH_UNIX_SECONDS * 1000 + millis)
}

/// Convert a UTC date/time to seconds since the epoch.
pub fn datetime_to_seconds(dt: DateTime<Utc>) -> f64 {
    (dt.timestamp_millis() - EPOCH_UNIX_SECONDS * 1000) as f64 / 1000.0
}

/// Parse an ISO 8601 time stamp into seconds since the epoch.
///
/// Accepts RFC 3339 (`2024-01-15T12:00:00Z`), a naive date/time (assumed UTC)
/// or a bare date.
pub fn parse_time(s: &str) -> MetDataResult<f64> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(datetime_to_seconds(dt.with_timezone(&Utc)));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime_to_seconds(Utc.from_utc_datetime(&ndt)));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(&format!("{}T00:00:00", s), "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime_to_seconds(Utc.from_utc_datetime(&ndt)));
    }

    Err(MetDataError::InvalidTime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_epoch_is_zero() {
        let epoch = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(datetime_to_seconds(epoch), 0.0);
    }

    #[test]
    fn test_parse_rfc3339() {
        let secs = parse_time("2000-01-02T00:00:00Z").unwrap();
        assert_eq!(secs, 86400.0);
    }

    #[test]
    fn test_parse_date_only() {
        let secs = parse_time("2000-01-11").unwrap();
        assert_eq!(secs, 10.0 * 86400.0);
    }

    #[test]
    fn test_seconds_to_datetime() {
        let dt = seconds_to_datetime(86400.0 * 31.0 + 3600.0).unwrap();
        assert_eq!(dt.year(), 2000);
        assert_eq!(dt.month(), 2);
        assert_eq!(dt.day(), 1);
        assert_eq!(dt.hour(), 1);
    }

    #[test]
    fn test_invalid_time() {
        assert!(parse_time("yesterday").is_err());
    }
}
