//! # qval-schema — Template Matching for Untrusted Queries
//!
//! Validates a dynamically-typed query against a declarative template and
//! produces a normalized copy keyed by canonical symbolic field names.
//!
//! ## Matching (`matcher`)
//!
//! [`process`] walks the template and the query in lockstep:
//!
//! - a wildcard template accepts any query unchanged;
//! - a text, number or boolean leaf accepts any query of the same kind;
//! - a one-element list template applies its element to every query item;
//! - a map template projects the query onto the template's fields, honoring
//!   the `_optional` key convention and dropping fields it does not name.
//!
//! The first mismatch aborts the walk with a [`SchemaMismatch`] carrying
//! the path to the failing node.
//!
//! ## Bounded Validation (`validator`)
//!
//! [`QueryValidator`] wraps a template with [`ValidatorConfig`] limits on
//! query depth and size, checked before matching. Use it at request
//! boundaries where queries are attacker-controlled.
//!
//! ## Crate Policy
//!
//! - Depends only on `qval-core` internally.
//! - The matcher is pure: inputs are borrowed immutably and every output
//!   node is freshly allocated.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod config;
pub mod matcher;
pub mod path;
pub mod validator;

pub use config::{ConfigError, ValidatorConfig};
pub use matcher::{matches, process, validate_and_normalize, MismatchReason, SchemaMismatch};
pub use path::{PathSegment, QueryPath};
pub use validator::{QueryValidator, ValidationError};
