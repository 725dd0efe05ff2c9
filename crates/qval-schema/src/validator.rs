//! # Bounded Query Validator
//!
//! A template paired with size limits, for use at request boundaries.
//! Queries are measured iteratively before matching, so an oversized or
//! deeply nested payload is rejected without recursing into it.
//!
//! ## Thread Safety
//!
//! `QueryValidator` is `Send + Sync` and holds no mutable state; one
//! instance can serve concurrent requests.

use qval_core::{CoreError, Value};
use thiserror::Error;

use crate::config::ValidatorConfig;
use crate::matcher::{process, SchemaMismatch};

/// Error returned by [`QueryValidator`].
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The query does not satisfy the template.
    #[error(transparent)]
    Mismatch(#[from] SchemaMismatch),

    /// The query nests deeper than the configured limit.
    #[error("query nesting exceeds depth limit of {limit}")]
    DepthLimitExceeded {
        /// Configured maximum depth.
        limit: usize,
    },

    /// The query has more nodes than the configured limit.
    #[error("query exceeds node limit of {limit}")]
    NodeLimitExceeded {
        /// Configured maximum node count.
        limit: usize,
    },

    /// The normalized value has no JSON form (it contains a wildcard).
    #[error("normalized value cannot be encoded: {0}")]
    Encode(#[from] CoreError),
}

impl ValidationError {
    /// The mismatch details, if the query failed matching.
    pub fn as_mismatch(&self) -> Option<&SchemaMismatch> {
        match self {
            ValidationError::Mismatch(m) => Some(m),
            _ => None,
        }
    }
}

/// A template with the limits applied to every query checked against it.
#[derive(Debug, Clone)]
pub struct QueryValidator {
    template: Value,
    config: ValidatorConfig,
}

impl QueryValidator {
    /// Create a validator with the default limits.
    pub fn new(template: Value) -> Self {
        Self::with_config(template, ValidatorConfig::default())
    }

    pub fn with_config(template: Value, config: ValidatorConfig) -> Self {
        Self { template, config }
    }

    pub fn template(&self) -> &Value {
        &self.template
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Check limits, then match `query` and return the normalized value.
    ///
    /// # Errors
    ///
    /// Returns `DepthLimitExceeded` or `NodeLimitExceeded` before any
    /// matching is done, and `Mismatch` if the query does not satisfy the
    /// template.
    pub fn validate(&self, query: &Value) -> Result<Value, ValidationError> {
        self.check_limits(query)?;
        match process(&self.template, query) {
            Ok(normalized) => {
                tracing::trace!("query accepted");
                Ok(normalized)
            }
            Err(mismatch) => {
                tracing::debug!(
                    path = %mismatch.path,
                    reason = %mismatch.reason,
                    "query rejected by template"
                );
                Err(mismatch.into())
            }
        }
    }

    /// Validate an already-decoded JSON payload and re-encode the result.
    ///
    /// A JSON payload holds no wildcard, so this only fails with limit and
    /// mismatch errors.
    pub fn validate_json(
        &self,
        query: serde_json::Value,
    ) -> Result<serde_json::Value, ValidationError> {
        self.validate_to_json(&Value::from(query))
    }

    /// Validate `query` and encode the normalized value as JSON.
    ///
    /// # Errors
    ///
    /// As [`validate`](Self::validate), plus `Encode` when a wildcard
    /// template passes through a query node that is itself `Value::Wildcard`.
    pub fn validate_to_json(&self, query: &Value) -> Result<serde_json::Value, ValidationError> {
        let normalized = self.validate(query)?;
        Ok(serde_json::Value::try_from(&normalized)?)
    }

    /// Whether `query` passes both the limits and the template.
    pub fn is_valid(&self, query: &Value) -> bool {
        self.validate(query).is_ok()
    }

    fn check_limits(&self, query: &Value) -> Result<(), ValidationError> {
        let ValidatorConfig {
            max_depth,
            max_nodes,
        } = self.config;
        if max_depth.is_none() && max_nodes.is_none() {
            return Ok(());
        }

        let mut stack = vec![(query, 1usize)];
        // Nodes are counted when discovered, before their parent's children
        // are queued, so the stack never outgrows the node limit.
        let mut seen = 1usize;
        check_node_count(seen, max_nodes)?;
        while let Some((value, depth)) = stack.pop() {
            if let Some(limit) = max_depth {
                if depth > limit {
                    tracing::debug!(limit, "query rejected: depth limit exceeded");
                    return Err(ValidationError::DepthLimitExceeded { limit });
                }
            }
            match value {
                Value::List(items) => {
                    seen += items.len();
                    check_node_count(seen, max_nodes)?;
                    stack.extend(items.iter().map(|v| (v, depth + 1)));
                }
                Value::Map(map) => {
                    seen += map.len();
                    check_node_count(seen, max_nodes)?;
                    stack.extend(map.values().map(|v| (v, depth + 1)));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

fn check_node_count(seen: usize, max_nodes: Option<usize>) -> Result<(), ValidationError> {
    match max_nodes {
        Some(limit) if seen > limit => {
            tracing::debug!(limit, "query rejected: node limit exceeded");
            Err(ValidationError::NodeLimitExceeded { limit })
        }
        _ => Ok(()),
    }
}
