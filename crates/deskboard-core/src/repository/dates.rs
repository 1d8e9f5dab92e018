//! Timestamp (De)serialization
//!
//! Timestamps are stored as ISO-8601 strings with millisecond precision,
//! e.g. `2024-01-10T09:30:00.000Z`. Reading is lenient: an absent, null or
//! unparseable string becomes `None` instead of failing the whole load.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Format a timestamp the way it is written to storage
pub fn format(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp; bare dates are taken as midnight UTC
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Use as `#[serde(default, with = "crate::repository::dates")]` on
/// `Option<DateTime<Utc>>` fields.
pub fn serialize<S>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.serialize_str(&format(d)),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => {
            let parsed = parse(&s);
            if parsed.is_none() {
                log::warn!("[STORE] Dropping unparseable timestamp {:?}", s);
            }
            parsed
        }
        Some(serde_json::Value::Null) | None => None,
        Some(other) => {
            log::warn!("[STORE] Dropping non-string timestamp {}", other);
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(default, with = "crate::repository::dates")]
        at: Option<DateTime<Utc>>,
        label: String,
    }

    #[test]
    fn test_format_millis_z() {
        let d = Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap();
        assert_eq!(format(&d), "2024-01-10T09:30:00.000Z");
    }

    #[test]
    fn test_parse_variants() {
        assert!(parse("2024-01-10T09:30:00.000Z").is_some());
        assert!(parse("2024-01-10T09:30:00+02:00").is_some());
        assert_eq!(
            parse("2024-02-15"),
            Some(Utc.with_ymd_and_hms(2024, 2, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse("not-a-date"), None);
        assert_eq!(parse(""), None);
    }

    #[test]
    fn test_lenient_field() {
        let bad: Stamped = serde_json::from_str(r#"{"at":"not-a-date","label":"x"}"#).unwrap();
        assert_eq!(bad.at, None);
        assert_eq!(bad.label, "x");

        let missing: Stamped = serde_json::from_str(r#"{"label":"y"}"#).unwrap();
        assert_eq!(missing.at, None);

        let number: Stamped = serde_json::from_str(r#"{"at":17,"label":"z"}"#).unwrap();
        assert_eq!(number.at, None);
    }

    #[test]
    fn test_field_round_trip() {
        let original = Stamped {
            at: Some(Utc.with_ymd_and_hms(2023, 12, 20, 8, 0, 5).unwrap()),
            label: "ci".into(),
        };
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.contains("2023-12-20T08:00:05.000Z"));
        let back: Stamped = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }
}
