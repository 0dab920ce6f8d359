//! ISO-8601 timestamps that tolerate absent or malformed input.
//!
//! Used with `#[serde(default, with = "crate::types::timestamp::lenient")]`
//! on `Option<DateTime<Utc>>` fields. Anything that does not parse as a
//! timestamp deserializes to `None` instead of failing the whole document.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Parse a timestamp in any of the layouts the providers and legacy files use.
///
/// Accepts RFC 3339, offset datetimes with a space separator, and naive
/// datetimes (interpreted as UTC). Returns `None` for everything else.
pub fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive.and_utc());
        }
    }

    None
}

/// Canonical text form written to disk and over the API.
pub fn format(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter for `Option<DateTime<Utc>>`.
pub mod lenient {
    use chrono::{DateTime, Utc};
    use serde::de::IgnoredAny;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Other(IgnoredAny),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::format(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Raw>::deserialize(deserializer)?;
        Ok(match raw {
            Some(Raw::Text(text)) => super::parse_lenient(&text),
            Some(Raw::Other(_)) | None => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339() {
        let dt = parse_lenient("2020-05-01T18:20:33.483Z").unwrap();
        assert_eq!(dt.timestamp_millis(), 1588357233483);
    }

    #[test]
    fn test_parse_naive_iso_as_utc() {
        let dt = parse_lenient("2026-10-15T08:30:00.123456").unwrap();
        let expected = Utc.with_ymd_and_hms(2026, 10, 15, 8, 30, 0).unwrap()
            + chrono::Duration::microseconds(123456);
        assert_eq!(dt, expected);
    }

    #[test]
    fn test_parse_space_separated_with_offset() {
        let dt = parse_lenient("2021-03-18 12:34:56.789000+00:00").unwrap();
        assert_eq!(
            dt,
            Utc.with_ymd_and_hms(2021, 3, 18, 12, 34, 56).unwrap()
                + chrono::Duration::milliseconds(789)
        );
    }

    #[test]
    fn test_malformed_is_unknown() {
        assert!(parse_lenient("").is_none());
        assert!(parse_lenient("yesterday").is_none());
        assert!(parse_lenient("2021-13-45T99:00:00Z").is_none());
    }

    #[derive(Debug, serde::Deserialize, serde::Serialize)]
    struct Holder {
        #[serde(default, with = "lenient")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_lenient_field_tolerates_wrong_type() {
        let h: Holder = serde_json::from_str(r#"{"at": 12345}"#).unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str(r#"{"at": "not a date"}"#).unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str(r#"{}"#).unwrap();
        assert!(h.at.is_none());
        let h: Holder = serde_json::from_str(r#"{"at": null}"#).unwrap();
        assert!(h.at.is_none());
    }

    #[test]
    fn test_lenient_field_serializes_utc_z() {
        let h = Holder {
            at: Some(Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()),
        };
        assert_eq!(
            serde_json::to_string(&h).unwrap(),
            r#"{"at":"2026-10-15T12:00:00Z"}"#
        );
    }
}
