//! # Validator Configuration
//!
//! Size limits applied to queries before matching. The matcher recurses
//! once per level of template nesting and allocates one output node per
//! matched query node; these limits bound both for untrusted input.
//!
//! Loaded from YAML by embedders that keep limits alongside their other
//! service configuration:
//!
//! ```yaml
//! max_depth: 32
//! max_nodes: 10000
//! ```
//!
//! Omitted fields take their defaults; `null` disables a limit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum query nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum number of nodes in one query.
pub const DEFAULT_MAX_NODES: usize = 100_000;

/// Error loading a [`ValidatorConfig`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid YAML or has unknown fields.
    #[error("invalid validator config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A limit was set to zero, which no query can satisfy.
    #[error("validator config field '{field}' must be at least 1")]
    ZeroLimit {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Limits on accepted queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Maximum nesting depth; a scalar has depth 1. `None` disables the check.
    pub max_depth: Option<usize>,
    /// Maximum total node count. `None` disables the check.
    pub max_nodes: Option<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_nodes: Some(DEFAULT_MAX_NODES),
        }
    }
}

impl ValidatorConfig {
    /// A configuration with no limits, for trusted inputs.
    pub fn unbounded() -> Self {
        Self {
            max_depth: None,
            max_nodes: None,
        }
    }

    /// Parse a configuration from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed YAML or unknown fields and
    /// `ConfigError::ZeroLimit` for a zero limit.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Reject limits no query can satisfy.
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::ZeroLimit { field: "max_depth" });
        }
        if self.max_nodes == Some(0) {
            return Err(ConfigError::ZeroLimit { field: "max_nodes" });
        }
        Ok(())
    }
}
