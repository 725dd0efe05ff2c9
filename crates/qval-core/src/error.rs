//! # Error Types
//!
//! Errors raised while building values or crossing the decode/encode
//! boundary. Matching failures live in `qval-schema`, not here.

use thiserror::Error;

/// Error produced by the value model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A symbolic field name contained characters outside the identifier set.
    #[error("invalid field name {0:?}: expected non-empty ASCII alphanumerics, '_' or '-'")]
    InvalidFieldName(String),

    /// The wildcard marker was asked to become ordinary data.
    #[error("wildcard is a template marker and has no data representation")]
    WildcardNotData,

    /// NaN and infinities have no `Number` representation.
    #[error("non-finite number {0} cannot be represented")]
    NonFiniteNumber(f64),

    /// A decoded YAML tree used a construct with no `Value` equivalent.
    #[error("unsupported YAML value: {0}")]
    UnsupportedYaml(String),
}
