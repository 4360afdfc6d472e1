//! # Strict JSON Parsing — Duplicate-Key Guard
//!
//! Decodes raw text into a `serde_json::Value` while rejecting duplicate
//! keys in any object literal, at any nesting depth.
//!
//! ## Invariant
//!
//! The collision check runs *inside* the deserializer, not over the decoded
//! map. Once a JSON object has been decoded, colliding keys are lost to
//! last-write-wins, so a post-hoc check could only detect the loss, never
//! prevent it. A collision aborts the entire parse; no partial value is
//! produced.
//!
//! Callers that want the implicit last-write-wins behavior (lenient
//! diagnostic re-reads) select it explicitly with
//! [`DuplicateKeys::LastWins`].

use serde::de::{self, DeserializeSeed, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Number, Value};

use crate::error::ParseError;

/// How object-literal key collisions are treated during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// A collision is a fatal parse error (the default).
    #[default]
    Reject,
    /// Keep the last-encountered value for a colliding key.
    LastWins,
}

/// Parse `text` into a JSON value under the given duplicate-key mode.
pub fn value_from_str(text: &str, mode: DuplicateKeys) -> Result<Value, ParseError> {
    match mode {
        DuplicateKeys::LastWins => Ok(serde_json::from_str(text)?),
        DuplicateKeys::Reject => {
            let mut deserializer = serde_json::Deserializer::from_str(text);
            let value = match CheckedValue.deserialize(&mut deserializer) {
                Ok(value) => value,
                // The visitor reports collisions through serde's custom
                // error channel; everything else is plain malformed JSON.
                Err(e) if e.to_string().contains("duplicate key") => {
                    return Err(ParseError::DuplicateKey(e.to_string()));
                }
                Err(e) => return Err(ParseError::Json(e)),
            };
            deserializer.end()?;
            Ok(value)
        }
    }
}

/// Seed that builds a `Value` while checking object keys for collisions.
struct CheckedValue;

impl<'de> DeserializeSeed<'de> for CheckedValue {
    type Value = Value;

    fn deserialize<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(CheckedValueVisitor)
    }
}

struct CheckedValueVisitor;

impl<'de> Visitor<'de> for CheckedValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
        Ok(Value::Number(v.into()))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null))
    }

    fn visit_str<E>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element_seed(CheckedValue)? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Map::new();
        while let Some(key) = map.next_key::<String>()? {
            let value = map.next_value_seed(CheckedValue)?;
            if object.insert(key.clone(), value).is_some() {
                return Err(de::Error::custom(format!("duplicate key \"{key}\"")));
            }
        }
        Ok(Value::Object(object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_strict_rejects_top_level_duplicate() {
        let text = r#"{"a": 1, "a": 2}"#;
        let err = value_from_str(text, DuplicateKeys::Reject).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey(msg) if msg.contains("\"a\"")));
    }

    #[test]
    fn test_strict_rejects_nested_duplicate() {
        let text = r#"{"outer": {"inner": [{"x": 1, "x": 2}]}}"#;
        let err = value_from_str(text, DuplicateKeys::Reject).unwrap_err();
        assert!(matches!(err, ParseError::DuplicateKey(msg) if msg.contains("\"x\"")));
    }

    #[test]
    fn test_lenient_keeps_last_value() {
        let text = r#"{"a": 1, "a": 2}"#;
        let value = value_from_str(text, DuplicateKeys::LastWins).unwrap();
        assert_eq!(value, json!({"a": 2}));
    }

    #[test]
    fn test_strict_accepts_clean_document() {
        let text = r#"{"a": [1, 2.5, null, true, "s"], "b": {"c": {}}}"#;
        let value = value_from_str(text, DuplicateKeys::Reject).unwrap();
        assert_eq!(value, json!({"a": [1, 2.5, null, true, "s"], "b": {"c": {}}}));
    }

    #[test]
    fn test_strict_rejects_malformed_json() {
        let err = value_from_str("{\"a\": ", DuplicateKeys::Reject).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }

    #[test]
    fn test_strict_rejects_trailing_garbage() {
        let err = value_from_str("{} {}", DuplicateKeys::Reject).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}
