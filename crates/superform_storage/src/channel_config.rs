//! Helpers for the JSON blob stored in `Channel::config`.

use serde_json::{Map, Value};

/// Parse a serialized channel config as a JSON object.
///
/// An empty or whitespace-only config yields an empty object. Anything that is
/// valid JSON but not an object is rejected.
pub fn parse_config_object(raw: &str) -> Result<Map<String, Value>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::de::Error::custom(format!(
            "channel config must be a JSON object, found {}",
            json_kind(&other)
        ))),
    }
}

/// Set `key` in a serialized channel config and return the new serialization.
///
/// Configs that cannot be read as an object are replaced by a fresh object so
/// the value is never lost.
pub fn merge_config_value(raw: &str, key: &str, value: Value) -> String {
    let mut map = parse_config_object(raw).unwrap_or_default();
    map.insert(key.to_string(), value);
    Value::Object(map).to_string()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_config_is_empty_object() {
        assert!(parse_config_object("").unwrap().is_empty());
        assert!(parse_config_object("   ").unwrap().is_empty());
    }

    #[test]
    fn test_non_object_rejected() {
        let err = parse_config_object("[1,2]").unwrap_err();
        assert!(err.to_string().contains("an array"));
        assert!(parse_config_object("{not json").is_err());
    }

    #[test]
    fn test_merge_into_existing_object() {
        let merged = merge_config_value(r#"{"username":"bot"}"#, "error", json!("boom"));
        let map = parse_config_object(&merged).unwrap();
        assert_eq!(map["username"], "bot");
        assert_eq!(map["error"], "boom");
    }

    #[test]
    fn test_merge_into_empty_or_garbage() {
        let merged = merge_config_value("", "error", json!("boom"));
        assert_eq!(merged, r#"{"error":"boom"}"#);
        let merged = merge_config_value("garbage", "error", json!("boom"));
        assert_eq!(merged, r#"{"error":"boom"}"#);
    }
}
