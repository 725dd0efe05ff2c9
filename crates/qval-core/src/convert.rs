//! # Boundary Conversions
//!
//! Embedders decode request payloads with their own codec and hand the
//! decoded tree to the matcher. These impls convert between those trees and
//! [`Value`]:
//!
//! - `serde_json::Value` → `Value`: infallible. Object keys become
//!   `Key::Text`.
//! - `serde_yaml::Value` → `Value`: fallible. Scalar mapping keys are
//!   stringified into `Key::Text`; sequence or mapping keys are rejected.
//! - `&Value` → `serde_json::Value`: fallible, for re-encoding a normalized
//!   result. Symbolic and text keys both render as JSON strings. The
//!   wildcard marker has no data form and is rejected.

use crate::error::CoreError;
use crate::key::Key;
use crate::value::{Map, Number, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Map(
                obj.into_iter()
                    .map(|(k, v)| (Key::Text(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl TryFrom<serde_yaml::Value> for Value {
    type Error = CoreError;

    fn try_from(yaml: serde_yaml::Value) -> Result<Self, Self::Error> {
        match yaml {
            serde_yaml::Value::Null => Ok(Value::Null),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_yaml::Value::Number(n) => yaml_number(&n).map(Value::Number),
            serde_yaml::Value::String(s) => Ok(Value::Text(s)),
            serde_yaml::Value::Sequence(seq) => {
                let items: Result<Vec<Value>, CoreError> =
                    seq.into_iter().map(Value::try_from).collect();
                Ok(Value::List(items?))
            }
            serde_yaml::Value::Mapping(mapping) => {
                let mut map = Map::new();
                for (k, v) in mapping {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        other => {
                            return Err(CoreError::UnsupportedYaml(format!(
                                "map key {other:?}"
                            )))
                        }
                    };
                    map.insert(Key::Text(key), Value::try_from(v)?);
                }
                Ok(Value::Map(map))
            }
            // Tags carry no meaning for matching; keep the inner value.
            serde_yaml::Value::Tagged(tagged) => Value::try_from(tagged.value),
        }
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Result<Number, CoreError> {
    if let Some(i) = n.as_i64() {
        Ok(Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(Number::from(u))
    } else if let Some(f) = n.as_f64() {
        Number::from_f64(f).ok_or(CoreError::NonFiniteNumber(f))
    } else {
        Err(CoreError::UnsupportedYaml(format!("number {n}")))
    }
}

impl TryFrom<&Value> for serde_json::Value {
    type Error = CoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => Ok(serde_json::Value::Number(n.clone())),
            Value::Text(s) => Ok(serde_json::Value::String(s.clone())),
            Value::List(items) => {
                let items: Result<Vec<_>, CoreError> =
                    items.iter().map(serde_json::Value::try_from).collect();
                Ok(serde_json::Value::Array(items?))
            }
            Value::Map(map) => {
                let mut obj = serde_json::Map::new();
                for (k, v) in map {
                    obj.insert(k.as_str().to_string(), serde_json::Value::try_from(v)?);
                }
                Ok(serde_json::Value::Object(obj))
            }
            Value::Wildcard => Err(CoreError::WildcardNotData),
        }
    }
}

impl TryFrom<Value> for serde_json::Value {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::Value::try_from(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_object_keys_become_text() {
        let v = Value::from(json!({"name": "Alice", "age": 30}));
        let map = v.as_map().unwrap();
        assert_eq!(map.get(&Key::from("name")), Some(&Value::from("Alice")));
        assert_eq!(map.get(&Key::from("age")), Some(&Value::from(30)));
        assert!(map.keys().all(|k| !k.is_symbol()));
    }

    #[test]
    fn test_json_null_and_nesting() {
        let v = Value::from(json!({"items": [1, null, {"ok": true}]}));
        let items = v.as_map().unwrap()[&Key::from("items")].as_list().unwrap();
        assert_eq!(items[0], Value::from(1));
        assert!(items[1].is_null());
        assert_eq!(items[2], Value::map([("ok", true)]));
    }

    #[test]
    fn test_json_float_preserved() {
        let v = Value::from(json!(2.5));
        assert_eq!(v.as_number().and_then(Number::as_f64), Some(2.5));
    }

    #[test]
    fn test_yaml_conversion() {
        let yaml_str = r#"
name: Alice
count: 42
ratio: 0.5
enabled: true
tags:
  - one
  - two
1: numeric-key
"#;
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let v = Value::try_from(yaml).unwrap();
        let map = v.as_map().unwrap();
        assert_eq!(map[&Key::from("name")], Value::from("Alice"));
        assert_eq!(map[&Key::from("count")], Value::from(42));
        assert_eq!(map[&Key::from("enabled")], Value::from(true));
        assert_eq!(map[&Key::from("tags")], Value::list(["one", "two"]));
        assert_eq!(map[&Key::from("1")], Value::from("numeric-key"));
        assert_eq!(
            map[&Key::from("ratio")].as_number().and_then(Number::as_f64),
            Some(0.5)
        );
    }

    #[test]
    fn test_yaml_sequence_key_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("? [a, b]\n: value\n").unwrap();
        assert!(matches!(
            Value::try_from(yaml),
            Err(CoreError::UnsupportedYaml(_))
        ));
    }

    #[test]
    fn test_yaml_non_finite_rejected() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(".inf").unwrap();
        assert!(matches!(
            Value::try_from(yaml),
            Err(CoreError::NonFiniteNumber(_))
        ));
    }

    #[test]
    fn test_encode_symbolic_keys_as_strings() {
        let v = Value::map([
            (Key::symbol("name").unwrap(), Value::from("Alice")),
            (Key::symbol("tags").unwrap(), Value::list(["a"])),
        ]);
        let json = serde_json::Value::try_from(&v).unwrap();
        assert_eq!(json, json!({"name": "Alice", "tags": ["a"]}));
    }

    #[test]
    fn test_encode_wildcard_rejected() {
        let v = Value::list([Value::Wildcard]);
        assert_eq!(
            serde_json::Value::try_from(v),
            Err(CoreError::WildcardNotData)
        );
    }
}
