//! # Kind Classification
//!
//! Maps a value to one of the fixed semantic kinds the matcher compares.
//! Because `Value` is a closed enum, classification is a single exhaustive
//! `match`: no value can satisfy two kinds at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Semantic kind of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Text,
    Number,
    Map,
    List,
    Boolean,
    /// The template-only "match anything" marker.
    Wildcard,
}

impl Kind {
    /// Lowercase name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Number => "number",
            Kind::Map => "map",
            Kind::List => "list",
            Kind::Boolean => "boolean",
            Kind::Wildcard => "wildcard",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a value. `None` means the value has no recognized kind.
pub fn classify(value: &Value) -> Option<Kind> {
    match value {
        Value::Text(_) => Some(Kind::Text),
        Value::Number(_) => Some(Kind::Number),
        Value::Map(_) => Some(Kind::Map),
        Value::List(_) => Some(Kind::List),
        Value::Bool(_) => Some(Kind::Boolean),
        Value::Wildcard => Some(Kind::Wildcard),
        Value::Null => None,
    }
}
