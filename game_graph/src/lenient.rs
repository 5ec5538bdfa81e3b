//! Field-level fallback for editor records.
//!
//! The inspector forms write whatever the user typed, so a single field can
//! arrive with the wrong JSON type. Such a field reads as unset and the rest of
//! its record is kept.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional field, treating any value that does not fit `T`
/// (including `null`) as absent.
pub(crate) fn optional<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(T::deserialize(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "optional")]
        count: Option<u32>,
        #[serde(default, deserialize_with = "optional")]
        label: Option<String>,
    }

    #[test]
    fn test_wrong_type_is_unset() {
        let sample: Sample = serde_json::from_value(json!({ "count": "three", "label": "x" })).unwrap();
        assert!(sample.count.is_none());
        assert_eq!(sample.label.as_deref(), Some("x"));
    }

    #[test]
    fn test_missing_field_is_unset() {
        let sample: Sample = serde_json::from_value(json!({ "count": 3 })).unwrap();
        assert_eq!(sample.count, Some(3));
        assert!(sample.label.is_none());
    }
}
