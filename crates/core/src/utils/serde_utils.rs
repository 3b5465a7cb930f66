//! Serde helpers for records produced by the external collaborator.

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Deserializer};

use super::time_utils::parse_record_datetime;

/// Identifiers arrive either as strings or as numbers depending on the backend.
#[derive(Deserialize)]
#[serde(untagged)]
enum OpaqueId {
    Text(String),
    Number(serde_json::Number),
}

impl From<OpaqueId> for String {
    fn from(id: OpaqueId) -> Self {
        match id {
            OpaqueId::Text(text) => text,
            OpaqueId::Number(number) => number.to_string(),
        }
    }
}

pub fn deserialize_opaque_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OpaqueId>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

pub fn deserialize_optional_opaque_id<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OpaqueId>::deserialize(deserializer)?.map(String::from))
}

pub fn deserialize_null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts the same timestamp shapes as task records. Unparsable values are
/// logged and dropped rather than failing the whole record.
pub fn deserialize_optional_record_datetime<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(|raw| {
        parse_record_datetime(&raw)
            .map_err(|e| warn!("Ignoring unparsable timestamp '{}' ({})", raw, e))
            .ok()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "deserialize_opaque_id")]
        id: String,
        #[serde(default, deserialize_with = "deserialize_optional_opaque_id")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "deserialize_null_as_default")]
        note: String,
        #[serde(default, deserialize_with = "deserialize_optional_record_datetime")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_ids_accept_strings_and_numbers() {
        let sample: Sample = serde_json::from_str(r#"{"id":"abc","parent":7}"#).unwrap();
        assert_eq!(sample.id, "abc");
        assert_eq!(sample.parent.as_deref(), Some("7"));

        let sample: Sample = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(sample.id, "42");
        assert_eq!(sample.parent, None);
    }

    #[test]
    fn test_nulls_become_defaults() {
        let sample: Sample = serde_json::from_str(r#"{"id":null,"parent":null,"note":null}"#).unwrap();
        assert_eq!(sample.id, "");
        assert_eq!(sample.parent, None);
        assert_eq!(sample.note, "");
    }

    #[test]
    fn test_record_datetimes_are_lenient() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();
        for raw in ["2025-01-02", "2025-01-02T00:00:00", "2025-01-02T00:00:00Z"] {
            let json = format!(r#"{{"id":1,"at":"{}"}}"#, raw);
            let sample: Sample = serde_json::from_str(&json).unwrap();
            assert_eq!(sample.at, Some(midnight), "input {}", raw);
        }

        let sample: Sample = serde_json::from_str(r#"{"id":1,"at":"whenever"}"#).unwrap();
        assert_eq!(sample.at, None);
        let sample: Sample = serde_json::from_str(r#"{"id":1,"at":null}"#).unwrap();
        assert_eq!(sample.at, None);
    }
}
