//! The breadth-first expansion loop shared by every query.

use std::collections::VecDeque;

use crate::equivalence::Equivalence;
use crate::search::limits::SearchLimits;
use crate::search::table::NodeTable;

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Outcome {
    /// Slot of the target, if one was requested and reached.
    pub(crate) found: Option<usize>,
    /// Number of times the edge function was called.
    pub(crate) expanded: usize,
    /// The node budget stopped the search before the frontier emptied.
    pub(crate) truncated: bool,
}

/// Expands `table` breadth-first from its start slot.
///
/// Each dequeued node is passed to `edges` exactly once and its neighbors are
/// pulled lazily. A neighbor already in the table is skipped, so the first
/// path to reach a node is the one recorded. With a `target`, the search
/// returns as soon as the target is inserted, without pulling the remaining
/// neighbors or draining the frontier.
///
/// The first error from `edges` is returned unchanged.
pub(crate) fn expand<T, Q, F, I, E>(
    table: &mut NodeTable<T, Q>,
    target: Option<&T>,
    limits: SearchLimits,
    mut edges: F,
) -> Result<Outcome, E>
where
    T: Clone,
    Q: Equivalence<T>,
    F: FnMut(&T) -> Result<I, E>,
    I: IntoIterator<Item = T>,
{
    debug_assert_eq!(table.len(), 1, "expansion starts from a fresh table");

    let mut frontier = VecDeque::from([0usize]);
    let mut expanded = 0usize;

    while let Some(current) = frontier.pop_front() {
        let current_path = table.path(current).clone();
        if !limits.allows_expansion(current_path.len()) {
            continue;
        }

        let neighbors = edges(table.node(current))?;
        expanded += 1;

        for edge in neighbors {
            debug_assert!(
                table.equivalent(&edge, &edge),
                "edges yielded a node that is not equivalent to itself"
            );

            let hash = table.hash(&edge);
            if table.find_hashed(hash, &edge).is_some() {
                continue;
            }

            if !limits.has_room(table.len()) {
                #[cfg(feature = "tracing")]
                tracing::trace!(
                    discovered = table.len(),
                    max_nodes = limits.max_nodes,
                    "node budget exhausted"
                );
                let outcome = Outcome {
                    found: None,
                    expanded,
                    truncated: true,
                };
                finished(table.len(), &outcome);
                return Ok(outcome);
            }

            let reached = target.is_some_and(|target| table.equivalent(&edge, target));
            let path = current_path.append(edge.clone());
            let slot = table.insert_unique(hash, edge, path);

            if reached {
                #[cfg(feature = "tracing")]
                tracing::trace!(depth = current_path.len() + 1, "target reached");
                let outcome = Outcome {
                    found: Some(slot),
                    expanded,
                    truncated: false,
                };
                finished(table.len(), &outcome);
                return Ok(outcome);
            }

            frontier.push_back(slot);
        }
    }

    let outcome = Outcome {
        found: None,
        expanded,
        truncated: false,
    };
    finished(table.len(), &outcome);
    Ok(outcome)
}

#[inline]
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn finished(discovered: usize, outcome: &Outcome) {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        discovered,
        expanded = outcome.expanded,
        found = outcome.found.is_some(),
        truncated = outcome.truncated,
        "breadth-first search finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::NaturalEquivalence;
    use core::convert::Infallible;

    fn ring(n: u32) -> impl FnMut(&u32) -> Result<Vec<u32>, Infallible> {
        move |&node| Ok(vec![(node + 1) % n])
    }

    #[test]
    fn test_exhausts_finite_graph() {
        let mut table = NodeTable::new(NaturalEquivalence, 0u32);
        let outcome = expand(&mut table, None, SearchLimits::UNBOUNDED, ring(5)).unwrap();

        assert_eq!(outcome, Outcome { found: None, expanded: 5, truncated: false });
        assert_eq!(table.len(), 5);
        assert_eq!(table.path(4).materialize(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_stops_at_target() {
        let mut table = NodeTable::new(NaturalEquivalence, 0u32);
        let outcome = expand(&mut table, Some(&2), SearchLimits::UNBOUNDED, ring(10)).unwrap();

        assert_eq!(outcome.found, Some(2));
        assert_eq!(outcome.expanded, 2);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_depth_limit_records_but_does_not_expand() {
        let mut table = NodeTable::new(NaturalEquivalence, 0u32);
        let limits = SearchLimits::UNBOUNDED.with_max_depth(2);
        let outcome = expand(&mut table, None, limits, ring(10)).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(outcome.expanded, 2);
        assert!(!outcome.truncated);
    }

    #[test]
    fn test_node_budget_truncates() {
        let mut table = NodeTable::new(NaturalEquivalence, 0u32);
        let limits = SearchLimits::UNBOUNDED.with_max_nodes(4);
        let outcome = expand(&mut table, None, limits, ring(10)).unwrap();

        assert_eq!(table.len(), 4);
        assert!(outcome.truncated);
    }

    #[test]
    fn test_error_aborts() {
        let mut table = NodeTable::new(NaturalEquivalence, 0u32);
        let result = expand(&mut table, None, SearchLimits::UNBOUNDED, |&n: &u32| {
            if n == 3 {
                Err("boom")
            } else {
                Ok(vec![n + 1])
            }
        });
        assert_eq!(result, Err("boom"));
    }
}
