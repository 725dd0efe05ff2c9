//! # Template Matcher
//!
//! Recursive, template-driven matching of a query against a template.
//!
//! ## Rules
//!
//! | Template            | Query           | Result                                  |
//! |---------------------|-----------------|-----------------------------------------|
//! | wildcard            | anything        | query, unchanged                        |
//! | text/number/boolean | same kind       | query, unchanged                        |
//! | list `[e, ..]`      | list            | each item matched against `e`           |
//! | map                 | map             | template fields projected from query    |
//! | anything else       |                 | [`SchemaMismatch`]                      |
//!
//! Only the first element of a list template is consulted. A list template
//! with no elements accepts only the empty list.
//!
//! Map fields are looked up by canonical name in text form first, then in
//! symbolic form. Output maps carry symbolic keys only. Query fields the
//! template does not name are dropped.
//!
//! ## Security Invariant
//!
//! Matching is a trust boundary. The output is built solely from template
//! structure and query leaves; no query map is passed through whole unless
//! the template says wildcard.

use std::fmt;

use qval_core::{classify, lookup_field, FieldName, Key, Kind, Map, TemplateKey, Value};
use thiserror::Error;

use crate::path::{PathSegment, QueryPath};

/// The query does not satisfy the template.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("schema mismatch at {path}: {reason}")]
pub struct SchemaMismatch {
    /// Path from the query root to the failing node.
    pub path: QueryPath,
    /// Which rule rejected the node.
    pub reason: MismatchReason,
}

/// Why a node was rejected. Diagnostic only; every reason is the same
/// failure to callers that only need a yes/no answer.
#[derive(Debug, Clone, PartialEq)]
pub enum MismatchReason {
    /// The query node's kind differs from the template node's kind.
    KindMismatch {
        expected: Kind,
        /// `None` when the query node has no recognized kind (null).
        found: Option<Kind>,
    },
    /// A required field is absent under both key forms.
    MissingField(FieldName),
    /// The template node has no recognized kind.
    UnknownTemplate,
    /// A non-empty query list met a list template with no element.
    EmptyListTemplate,
    /// A template map key yields no valid canonical field name.
    InvalidTemplateKey(Key),
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::KindMismatch { expected, found } => match found {
                Some(found) => write!(f, "expected {expected}, found {found}"),
                None => write!(f, "expected {expected}, found value of unknown kind"),
            },
            MismatchReason::MissingField(name) => write!(f, "missing required field '{name}'"),
            MismatchReason::UnknownTemplate => f.write_str("template node has unknown kind"),
            MismatchReason::EmptyListTemplate => {
                f.write_str("list template has no element template")
            }
            MismatchReason::InvalidTemplateKey(key) => {
                write!(f, "template key {key} has no canonical field name")
            }
        }
    }
}

/// Match `query` against `template` and return the normalized query.
///
/// # Errors
///
/// Returns [`SchemaMismatch`] at the first node where the query does not
/// satisfy the template.
pub fn process(template: &Value, query: &Value) -> Result<Value, SchemaMismatch> {
    let mut path = Vec::new();
    match_node(template, query, &mut path)
}

/// Alias of [`process`] under its request-handling name.
pub fn validate_and_normalize(template: &Value, query: &Value) -> Result<Value, SchemaMismatch> {
    process(template, query)
}

/// Whether `query` satisfies `template`.
pub fn matches(template: &Value, query: &Value) -> bool {
    process(template, query).is_ok()
}

fn match_node(
    template: &Value,
    query: &Value,
    path: &mut Vec<PathSegment>,
) -> Result<Value, SchemaMismatch> {
    match (template, query) {
        (Value::Wildcard, _) => Ok(query.clone()),
        (Value::Text(_), Value::Text(_))
        | (Value::Number(_), Value::Number(_))
        | (Value::Bool(_), Value::Bool(_)) => Ok(query.clone()),
        (Value::List(element), Value::List(items)) => match_list(element, items, path),
        (Value::Map(fields), Value::Map(entries)) => match_map(fields, entries, path),
        _ => {
            let reason = match classify(template) {
                None => MismatchReason::UnknownTemplate,
                Some(expected) => MismatchReason::KindMismatch {
                    expected,
                    found: classify(query),
                },
            };
            Err(reject(path, reason))
        }
    }
}

fn match_list(
    element: &[Value],
    items: &[Value],
    path: &mut Vec<PathSegment>,
) -> Result<Value, SchemaMismatch> {
    if items.is_empty() {
        return Ok(Value::List(Vec::new()));
    }
    let Some(element) = element.first() else {
        return Err(reject(path, MismatchReason::EmptyListTemplate));
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        path.push(PathSegment::Index(i));
        let matched = match_node(element, item, path);
        path.pop();
        out.push(matched?);
    }
    Ok(Value::List(out))
}

fn match_map(
    fields: &Map,
    entries: &Map,
    path: &mut Vec<PathSegment>,
) -> Result<Value, SchemaMismatch> {
    let mut out = Map::new();
    for (key, field_template) in fields {
        let Some(field) = TemplateKey::parse(key) else {
            return Err(reject(path, MismatchReason::InvalidTemplateKey(key.clone())));
        };
        let name = field.canonical();

        match lookup_field(entries, name) {
            Some(found) => {
                path.push(PathSegment::Field(name.clone()));
                let matched = match_node(field_template, found, path);
                path.pop();
                out.insert(Key::Symbol(name.clone()), matched?);
            }
            None if field.is_optional() => {}
            None => {
                return Err(reject(path, MismatchReason::MissingField(name.clone())));
            }
        }
    }
    Ok(Value::Map(out))
}

fn reject(path: &[PathSegment], reason: MismatchReason) -> SchemaMismatch {
    let path = QueryPath::from(path.to_vec());
    tracing::trace!(path = %path, reason = %reason, "query node rejected");
    SchemaMismatch { path, reason }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for query-like values with text keys.
    fn query_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::from),
            "[a-zA-Z0-9_ ]{0,20}".prop_map(Value::Text),
        ];
        leaf.prop_recursive(
            4,  // depth
            64, // desired size
            6,  // items per collection
            |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
                    prop::collection::btree_map("[a-z]{1,6}", inner, 0..6).prop_map(|m| {
                        Value::Map(m.into_iter().map(|(k, v)| (Key::Text(k), v)).collect())
                    }),
                ]
            },
        )
    }

    /// A template every value of this shape satisfies. Lists get a
    /// wildcard element since generated lists are heterogeneous.
    fn shape_of(value: &Value) -> Value {
        match value {
            Value::Text(_) => Value::from("t"),
            Value::Number(_) => Value::from(0),
            Value::Bool(_) => Value::from(false),
            Value::List(_) => Value::list([Value::Wildcard]),
            Value::Map(map) => Value::Map(
                map.iter()
                    .map(|(k, v)| (Key::symbol(k.as_str()).unwrap(), shape_of(v)))
                    .collect(),
            ),
            Value::Null | Value::Wildcard => Value::Wildcard,
        }
    }

    proptest! {
        /// The wildcard template returns any query unchanged.
        #[test]
        fn wildcard_absorbs_anything(q in query_value()) {
            prop_assert_eq!(process(&Value::Wildcard, &q).unwrap(), q);
        }

        /// A query always satisfies its own shape.
        #[test]
        fn query_matches_own_shape(q in query_value()) {
            prop_assert!(process(&shape_of(&q), &q).is_ok());
        }

        /// Normalizing a normalized value changes nothing.
        #[test]
        fn normalization_idempotent(q in query_value()) {
            let template = shape_of(&q);
            let once = process(&template, &q).unwrap();
            let twice = process(&template, &once).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Extra query fields never reach the output.
        #[test]
        fn extra_fields_projected_away(
            fields in prop::collection::btree_map("[a-m]{1,4}", query_value(), 0..5),
            extra in query_value(),
        ) {
            let q = Value::Map(fields.into_iter().map(|(k, v)| (Key::Text(k), v)).collect());
            let template = shape_of(&q);
            let Value::Map(mut widened) = q.clone() else { unreachable!() };
            widened.insert(Key::from("zz-extra"), extra);

            prop_assert_eq!(
                process(&template, &Value::Map(widened)).unwrap(),
                process(&template, &q).unwrap()
            );
        }

        /// Marking every field optional accepts the empty map.
        #[test]
        fn all_optional_accepts_empty(
            names in prop::collection::btree_set("[a-z]{1,6}", 0..6),
        ) {
            let template = Value::map(
                names.iter().map(|n| (Key::from(format!("_{n}")), Value::Wildcard)),
            );
            prop_assert_eq!(
                process(&template, &Value::Map(Map::new())).unwrap(),
                Value::Map(Map::new())
            );
        }
    }
}
