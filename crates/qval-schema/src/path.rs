//! # Query Paths
//!
//! Breadcrumbs from the query root to a node, rendered as `$`,
//! `$.user.name` or `$.items[2].id`.

use std::fmt;

use qval_core::FieldName;

/// One step from a container to a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A map field, by canonical name.
    Field(FieldName),
    /// A list element, by position.
    Index(usize),
}

/// A path from the query root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPath(Vec<PathSegment>);

impl QueryPath {
    /// The root path, `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<PathSegment>> for QueryPath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }
}

impl fmt::Display for QueryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(i) => write!(f, "[{i}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_display() {
        assert_eq!(QueryPath::root().to_string(), "$");
        assert!(QueryPath::root().is_root());
    }

    #[test]
    fn test_nested_display() {
        let path = QueryPath::from(vec![
            PathSegment::Field(FieldName::new("items").unwrap()),
            PathSegment::Index(2),
            PathSegment::Field(FieldName::new("id").unwrap()),
        ]);
        assert_eq!(path.to_string(), "$.items[2].id");
        assert_eq!(path.segments().len(), 3);
    }
}
