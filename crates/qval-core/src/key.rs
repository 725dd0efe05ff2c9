//! # Keys and Field Names
//!
//! Map keys come in two forms. Templates and normalized output use the
//! symbolic form (`Key::Symbol`), drawn from a closed vocabulary of
//! [`FieldName`]s. Queries decoded off the wire usually carry plain text
//! keys (`Key::Text`). The matcher accepts either form when looking up a
//! field, but only ever writes the symbolic form.
//!
//! ## Optional Keys
//!
//! A template key whose first character is `_` marks an optional field. The
//! underscore is stripped to obtain the canonical name: the template key
//! `_nickname` matches the query field `nickname` and is omitted from the
//! output when absent. See [`TemplateKey::parse`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Prefix marking a template key as optional.
const OPTIONAL_PREFIX: char = '_';

/// A symbolic field name.
///
/// Valid names are non-empty and consist of ASCII alphanumerics, `_` and
/// `-`. Serializes as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldName(String);

impl FieldName {
    /// Validate and wrap a field name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFieldName` if the name is empty or contains
    /// a character outside `[A-Za-z0-9_-]`.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        let name = name.into();
        if is_valid_field_name(&name) {
            Ok(Self(name))
        } else {
            Err(CoreError::InvalidFieldName(name))
        }
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_valid_field_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl TryFrom<String> for FieldName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FieldName> for String {
    fn from(name: FieldName) -> Self {
        name.0
    }
}

impl FromStr for FieldName {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A map key: either a symbolic field name or arbitrary text.
///
/// `Symbol` and `Text` keys with the same content are distinct keys, so a
/// single map may hold both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A symbolic key from the closed field-name vocabulary.
    Symbol(FieldName),
    /// A text key, as produced by decoding JSON objects or YAML mappings.
    Text(String),
}

impl Key {
    /// Build a symbolic key, validating the name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidFieldName` for names outside the
    /// identifier set.
    pub fn symbol(name: impl Into<String>) -> Result<Self, CoreError> {
        FieldName::new(name).map(Key::Symbol)
    }

    /// The textual content of the key, whichever form it takes.
    pub fn as_str(&self) -> &str {
        match self {
            Key::Symbol(name) => name.as_str(),
            Key::Text(text) => text,
        }
    }

    /// Returns true for `Key::Symbol`.
    pub fn is_symbol(&self) -> bool {
        matches!(self, Key::Symbol(_))
    }
}

impl From<FieldName> for Key {
    fn from(name: FieldName) -> Self {
        Key::Symbol(name)
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::Text(text.to_string())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Key::Text(text)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Symbol(name) => write!(f, ":{name}"),
            Key::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// A template map key split into its canonical name and optionality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateKey {
    canonical: FieldName,
    optional: bool,
}

impl TemplateKey {
    /// Apply the optional-key naming convention to a template key.
    ///
    /// A single leading underscore marks the key optional and is stripped.
    /// Returns `None` when the remainder is not a valid [`FieldName`], e.g.
    /// for the bare key `"_"`.
    pub fn parse(key: &Key) -> Option<Self> {
        let raw = key.as_str();
        let (name, optional) = match raw.strip_prefix(OPTIONAL_PREFIX) {
            Some(rest) => (rest, true),
            None => (raw, false),
        };
        let canonical = FieldName::new(name).ok()?;
        Some(Self {
            canonical,
            optional,
        })
    }

    /// The canonical (symbolic) name written to the output.
    pub fn canonical(&self) -> &FieldName {
        &self.canonical
    }

    /// Whether the field may be absent from the query.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}
