//! Instant parsing and expiry checks.
//!
//! The price feed sends ISO-8601 instants as strings. Most carry an offset
//! (`2024-03-15T10:00:00.1234567Z`), but some feeds omit it, in which case
//! the instant is read as UTC.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Formats accepted for instants without an offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an instant, returning `None` when the text is not a recognisable
/// ISO-8601 date-time.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Flight duration in milliseconds between two optional instants.
///
/// Returns 0 when either instant is missing or unparseable, and clamps
/// negative spans (end before start) to 0.
pub fn duration_ms(start: Option<&str>, end: Option<&str>) -> i64 {
    let (Some(start), Some(end)) = (start.and_then(parse_instant), end.and_then(parse_instant))
    else {
        return 0;
    };

    end.signed_duration_since(start).num_milliseconds().max(0)
}

/// Returns true once `now` has reached `valid_until`.
///
/// A price list is expired at its `valid_until` instant, not only after it.
pub fn is_expired(valid_until: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    valid_until <= now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn parse_rfc3339_with_offset() {
        assert_eq!(
            parse_instant("2024-03-15T10:00:00Z"),
            Some(utc(2024, 3, 15, 10, 0))
        );
        assert_eq!(
            parse_instant("2024-03-15T12:00:00+02:00"),
            Some(utc(2024, 3, 15, 10, 0))
        );
    }

    #[test]
    fn parse_long_fractional_seconds() {
        let parsed = parse_instant("2024-03-15T10:00:00.1234567Z").unwrap();
        assert_eq!(parsed.timestamp(), utc(2024, 3, 15, 10, 0).timestamp());
        assert_eq!(parsed.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parse_without_offset_reads_utc() {
        assert_eq!(
            parse_instant("2024-03-15T10:00:00"),
            Some(utc(2024, 3, 15, 10, 0))
        );
        assert_eq!(
            parse_instant("2024-03-15 10:00:00.5"),
            Some(utc(2024, 3, 15, 10, 0) + Duration::milliseconds(500))
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(parse_instant(""), None);
        assert_eq!(parse_instant("yesterday"), None);
        assert_eq!(parse_instant("2024-13-45T99:00:00Z"), None);
    }

    #[test]
    fn duration_between_instants() {
        let ms = duration_ms(Some("2024-03-15T10:00:00Z"), Some("2024-03-15T12:30:00Z"));
        assert_eq!(ms, 2 * 3_600_000 + 30 * 60_000);
    }

    #[test]
    fn duration_clamped_to_zero() {
        let ms = duration_ms(Some("2024-03-15T12:00:00Z"), Some("2024-03-15T10:00:00Z"));
        assert_eq!(ms, 0);
    }

    #[test]
    fn duration_zero_when_unparseable() {
        assert_eq!(duration_ms(Some("soon"), Some("2024-03-15T10:00:00Z")), 0);
        assert_eq!(duration_ms(Some("2024-03-15T10:00:00Z"), None), 0);
        assert_eq!(duration_ms(None, None), 0);
    }

    #[test]
    fn expiry_is_inclusive() {
        let valid_until = utc(2024, 3, 15, 10, 0);
        assert!(!is_expired(valid_until, valid_until - Duration::seconds(1)));
        assert!(is_expired(valid_until, valid_until));
        assert!(is_expired(valid_until, valid_until + Duration::seconds(1)));
    }
}
