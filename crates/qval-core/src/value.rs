//! # Value Model
//!
//! One dynamically-typed value space serves both templates and queries.
//! Templates read the same variants as shape descriptions (a `Text` leaf
//! means "any text", a one-element `List` means "a list of these"); queries
//! read them as data.
//!
//! ## Numbers
//!
//! `Number` is `serde_json::Number`. Integers within `i64`/`u64` range are
//! held exactly; anything else is an IEEE-754 `f64`, with the usual loss of
//! precision for integers beyond 2^53 that arrive as floats. NaN and the
//! infinities cannot be represented. Integer and float are one kind: no
//! value is ever coerced between them.

use std::collections::BTreeMap;
use std::fmt;

pub use serde_json::Number;

use crate::error::CoreError;
use crate::key::{FieldName, Key};
use crate::kind::{classify, Kind};

/// Key-value mapping with unique keys and deterministic (key-order) iteration.
pub type Map = BTreeMap<Key, Value>;

/// A dynamically-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absence of a value in a decoded payload. Has no kind.
    Null,
    /// `true` or `false`.
    Bool(bool),
    /// Integer or floating-point number.
    Number(Number),
    /// A character sequence.
    Text(String),
    /// An ordered sequence.
    List(Vec<Value>),
    /// A key-value mapping.
    Map(Map),
    /// Template-only marker matching any value. Not data.
    Wildcard,
}

impl Value {
    /// Build a map value from key/value pairs.
    ///
    /// Later pairs overwrite earlier pairs with an equal key.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Key>,
        V: Into<Value>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a list value.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a number from a float.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NonFiniteNumber` for NaN and infinities.
    pub fn from_f64(f: f64) -> Result<Self, CoreError> {
        Number::from_f64(f)
            .map(Value::Number)
            .ok_or(CoreError::NonFiniteNumber(f))
    }

    /// The kind of this value, or `None` if it has no recognized kind.
    pub fn kind(&self) -> Option<Kind> {
        classify(self)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Value::Wildcard)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Look up a field by canonical name; see [`lookup_field`].
    pub fn get(&self, name: &FieldName) -> Option<&Value> {
        self.as_map().and_then(|map| lookup_field(map, name))
    }
}

/// Look up a field in a query map by its canonical name.
///
/// The text form of the name is tried first, then the symbolic form, so
/// queries decoded with text keys and queries built with symbolic keys are
/// found identically.
pub fn lookup_field<'a>(map: &'a Map, name: &FieldName) -> Option<&'a Value> {
    map.get(&Key::Text(name.as_str().to_string()))
        .or_else(|| map.get(&Key::Symbol(name.clone())))
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(Number::from(n))
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Map(map)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
            Value::Wildcard => f.write_str("_"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str) -> Key {
        Key::symbol(name).unwrap()
    }

    #[test]
    fn test_wildcard_is_not_underscore_text() {
        assert_ne!(Value::Wildcard, Value::from("_"));
        assert!(Value::Wildcard.is_wildcard());
        assert!(!Value::from("_").is_wildcard());
    }

    #[test]
    fn test_map_builder_accepts_mixed_key_forms() {
        let v = Value::map([(sym("a"), Value::from(1)), (Key::from("b"), Value::from(2))]);
        let map = v.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get(&sym("a")), Some(&Value::from(1)));
        assert_eq!(map.get(&Key::from("b")), Some(&Value::from(2)));
    }

    #[test]
    fn test_lookup_prefers_text_then_symbol() {
        let name = FieldName::new("a").unwrap();

        let text_only = Value::map([("a", "text")]);
        assert_eq!(text_only.get(&name), Some(&Value::from("text")));

        let symbol_only = Value::map([(sym("a"), "symbol")]);
        assert_eq!(symbol_only.get(&name), Some(&Value::from("symbol")));

        let both = Value::map([(Key::from("a"), "text"), (sym("a"), "symbol")]);
        assert_eq!(both.get(&name), Some(&Value::from("text")));
    }

    #[test]
    fn test_lookup_missing_field() {
        let name = FieldName::new("missing").unwrap();
        assert_eq!(Value::map([("a", 1)]).get(&name), None);
        assert_eq!(Value::from(1).get(&name), None);
    }

    #[test]
    fn test_from_f64_rejects_non_finite() {
        assert!(Value::from_f64(1.5).is_ok());
        assert!(matches!(
            Value::from_f64(f64::INFINITY),
            Err(CoreError::NonFiniteNumber(_))
        ));
        assert!(Value::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn test_integer_and_float_stay_distinct_values() {
        let int = Value::from(1);
        let float = Value::from_f64(1.0).unwrap();
        assert_ne!(int, float);
        assert_eq!(int.kind(), float.kind());
    }

    #[test]
    fn test_display() {
        let v = Value::map([
            (sym("tags"), Value::list(["x", "y"])),
            (sym("any"), Value::Wildcard),
            (sym("on"), Value::from(true)),
            (sym("gone"), Value::Null),
        ]);
        assert_eq!(
            v.to_string(),
            r#"{:any: _, :gone: null, :on: true, :tags: ["x", "y"]}"#
        );
    }
}
