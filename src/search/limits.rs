//! Bounds on how far a traversal may go.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Optional bounds applied to a breadth-first search.
///
/// Both bounds are off by default, in which case a search runs until the
/// frontier is empty (or the target is found).
///
/// Limits can be loaded from configuration:
///
/// ```rust
/// use graph_paths::SearchLimits;
///
/// let limits = SearchLimits::from_json(r#"{ "max_depth": 4 }"#).unwrap();
/// assert_eq!(limits.max_depth, Some(4));
/// assert_eq!(limits.max_nodes, None);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchLimits {
    /// Nodes at this distance from the start are recorded but not expanded.
    pub max_depth: Option<usize>,
    /// Upper bound on discovered nodes, start included. Reaching it stops the
    /// search and marks the result truncated.
    pub max_nodes: Option<usize>,
}

impl SearchLimits {
    /// No bounds.
    pub const UNBOUNDED: Self = Self {
        max_depth: None,
        max_nodes: None,
    };

    /// Sets the depth bound.
    #[must_use]
    pub const fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the node budget.
    #[must_use]
    pub const fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Parses and validates limits from a JSON object.
    ///
    /// # Errors
    /// Returns [`LimitsError::Parse`] for malformed JSON or unknown fields, and
    /// any error [`SearchLimits::validate`] reports.
    pub fn from_json(input: &str) -> Result<Self, LimitsError> {
        let limits: Self = serde_json::from_str(input).map_err(LimitsError::Parse)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Checks that the limits can be honored.
    ///
    /// # Errors
    /// Returns [`LimitsError::ZeroNodeBudget`] when `max_nodes` is zero: the
    /// start node is always recorded.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.max_nodes == Some(0) {
            return Err(LimitsError::ZeroNodeBudget);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn allows_expansion(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth < max)
    }

    #[inline]
    pub(crate) fn has_room(&self, discovered: usize) -> bool {
        self.max_nodes.map_or(true, |max| discovered < max)
    }
}

/// The error type for rejected [`SearchLimits`].
#[derive(Debug)]
pub enum LimitsError {
    /// `max_nodes` was zero.
    ZeroNodeBudget,
    /// The configuration could not be deserialized.
    Parse(serde_json::Error),
}

impl fmt::Display for LimitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroNodeBudget => f.write_str("max_nodes must be at least 1"),
            Self::Parse(_) => f.write_str("invalid search limits"),
        }
    }
}

impl std::error::Error for LimitsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ZeroNodeBudget => None,
            Self::Parse(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_default_is_unbounded() {
        let limits = SearchLimits::default();
        assert_eq!(limits, SearchLimits::UNBOUNDED);
        assert!(limits.allows_expansion(usize::MAX - 1));
        assert!(limits.has_room(usize::MAX - 1));
    }

    #[test]
    fn test_bounds() {
        let limits = SearchLimits::UNBOUNDED.with_max_depth(2).with_max_nodes(3);
        assert!(limits.allows_expansion(1));
        assert!(!limits.allows_expansion(2));
        assert!(limits.has_room(2));
        assert!(!limits.has_room(3));
    }

    #[test]
    fn test_from_json() {
        let limits = SearchLimits::from_json(r#"{"max_depth": 3, "max_nodes": 100}"#).unwrap();
        assert_eq!(limits, SearchLimits::UNBOUNDED.with_max_depth(3).with_max_nodes(100));

        let empty = SearchLimits::from_json("{}").unwrap();
        assert_eq!(empty, SearchLimits::UNBOUNDED);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = SearchLimits::from_json(r#"{"depth": 3}"#).unwrap_err();
        assert!(matches!(err, LimitsError::Parse(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_zero_node_budget_rejected() {
        let err = SearchLimits::from_json(r#"{"max_nodes": 0}"#).unwrap_err();
        assert!(matches!(err, LimitsError::ZeroNodeBudget));
        assert_eq!(err.to_string(), "max_nodes must be at least 1");
    }
}
