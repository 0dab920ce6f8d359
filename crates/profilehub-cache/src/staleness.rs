//! Snapshot age checks.

use chrono::{DateTime, Duration, Utc};

/// Whether a snapshot last updated at `last_update` is due for a refresh.
///
/// The boundary is inclusive: a snapshot exactly `threshold` old is stale.
/// A snapshot that was never updated is always stale.
pub fn is_stale(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>, threshold: Duration) -> bool {
    match last_update {
        Some(at) => now.signed_duration_since(at) >= threshold,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_never_updated_is_stale() {
        assert!(is_stale(None, now(), Duration::hours(48)));
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let threshold = Duration::hours(48);
        assert!(is_stale(Some(now() - threshold), now(), threshold));
    }

    #[test]
    fn test_one_second_below_threshold_is_fresh() {
        let threshold = Duration::hours(48);
        let at = now() - threshold + Duration::seconds(1);
        assert!(!is_stale(Some(at), now(), threshold));
    }

    #[test]
    fn test_future_timestamp_is_fresh() {
        let at = now() + Duration::minutes(5);
        assert!(!is_stale(Some(at), now(), Duration::hours(48)));
    }
}
