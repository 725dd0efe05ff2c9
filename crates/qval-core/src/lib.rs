//! # qval-core — Value Model for Query Validation
//!
//! Defines the dynamically-typed value space shared by templates and
//! queries, the symbolic field-name vocabulary used for canonical output
//! keys, and the kind classifier the matcher in `qval-schema` is built on.
//!
//! ## Key Design Principles
//!
//! 1. **Closed value enum.** `Value` has one variant per kind. A number that
//!    is secretly text cannot be constructed, and the template-only
//!    `Wildcard` marker is its own variant, never confusable with the text
//!    `"_"`.
//!
//! 2. **Validated field names.** Canonical output keys are `FieldName`
//!    values. The only constructor checks the identifier charset, so every
//!    `Key::Symbol` in a normalized value is well-formed.
//!
//! 3. **Decoding stays outside.** This crate never parses text. Embedders
//!    decode payloads with their own codec and convert the decoded tree with
//!    the `From`/`TryFrom` impls in [`convert`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `qval-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod convert;
pub mod error;
pub mod key;
pub mod kind;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::CoreError;
pub use key::{FieldName, Key, TemplateKey};
pub use kind::{classify, Kind};
pub use value::{lookup_field, Map, Number, Value};
