//! `ShortestPaths` — the distance map returned by an all-targets search.

use core::fmt;
use core::hash::Hash;
use core::iter::FusedIterator;
use std::collections::HashMap;

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::equivalence::{Equivalence, NaturalEquivalence};
use crate::path::PathAccumulator;
use crate::search::table::{Entry, NodeTable};

/// Every node reached from a start node, with the shortest path to each.
///
/// Paths exclude the start node and include the node they lead to, so the
/// start maps to the empty path. Entries are kept in discovery order, which
/// for a breadth-first search is non-decreasing distance.
///
/// Lookups go through the same [`Equivalence`] the search used.
pub struct ShortestPaths<T, Q = NaturalEquivalence> {
    table: NodeTable<T, Q>,
    expanded: usize,
    truncated: bool,
}

impl<T, Q> ShortestPaths<T, Q> {
    pub(crate) fn new(table: NodeTable<T, Q>, expanded: usize, truncated: bool) -> Self {
        Self {
            table,
            expanded,
            truncated,
        }
    }

    /// The node the search started from.
    #[inline]
    pub fn start(&self) -> &T {
        self.table.node(0)
    }

    /// Number of reached nodes, start included.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Always `false`: the start node is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// How many times the edge function was called.
    #[inline]
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// `true` if a node budget stopped the search early. Nodes missing from a
    /// truncated result may still be reachable.
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// The equivalence used for lookups.
    #[inline]
    pub fn equivalence(&self) -> &Q {
        self.table.equivalence()
    }

    /// Iterates over `(node, path)` pairs in discovery order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.entries().iter(),
        }
    }

    /// Iterates over reached nodes in discovery order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &T> + '_ {
        self.table.entries().iter().map(|entry| &entry.node)
    }
}

impl<T, Q: Equivalence<T>> ShortestPaths<T, Q> {
    /// Returns `true` if `node` was reached.
    pub fn contains(&self, node: &T) -> bool {
        self.table.find(node).is_some()
    }

    /// The shared path accumulator for `node`.
    pub fn path(&self, node: &T) -> Option<&PathAccumulator<T>> {
        self.table.find(node).map(|slot| self.table.path(slot))
    }

    /// Number of edges on the shortest path to `node`.
    pub fn distance(&self, node: &T) -> Option<usize> {
        self.path(node).map(PathAccumulator::len)
    }
}

impl<T: Clone, Q: Equivalence<T>> ShortestPaths<T, Q> {
    /// The shortest path to `node`, start excluded, or `None` if it was not
    /// reached.
    pub fn get(&self, node: &T) -> Option<&[T]> {
        self.path(node).map(PathAccumulator::materialize)
    }
}

impl<T: Eq + Hash + Clone> ShortestPaths<T, NaturalEquivalence> {
    /// Converts into a standard map of materialized paths.
    pub fn into_hash_map(self) -> HashMap<T, Vec<T>> {
        self.table
            .into_entries()
            .into_iter()
            .map(|Entry { node, path }| {
                let path = path.to_vec();
                (node, path)
            })
            .collect()
    }
}

impl<T: fmt::Debug, Q> fmt::Debug for ShortestPaths<T, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T: Serialize, Q> Serialize for ShortestPaths<T, Q> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

impl<'a, T, Q> IntoIterator for &'a ShortestPaths<T, Q> {
    type Item = (&'a T, &'a PathAccumulator<T>);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ShortestPaths`].
pub struct Iter<'a, T> {
    inner: core::slice::Iter<'a, Entry<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a T, &'a PathAccumulator<T>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| (&entry.node, &entry.path))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equivalence::by_key;

    fn sample() -> ShortestPaths<&'static str> {
        let mut table = NodeTable::new(NaturalEquivalence, "a");
        let b = table.path(0).append("b");
        let hash = table.hash(&"b");
        table.insert_unique(hash, "b", b.clone());
        let hash = table.hash(&"c");
        table.insert_unique(hash, "c", b.append("c"));
        ShortestPaths::new(table, 2, false)
    }

    #[test]
    fn test_lookups() {
        let paths = sample();
        assert_eq!(*paths.start(), "a");
        assert_eq!(paths.len(), 3);
        assert!(!paths.is_empty());
        assert!(paths.contains(&"c"));
        assert!(!paths.contains(&"z"));
        assert_eq!(paths.get(&"a"), Some(&[][..]));
        assert_eq!(paths.get(&"c"), Some(&["b", "c"][..]));
        assert_eq!(paths.distance(&"c"), Some(2));
        assert_eq!(paths.get(&"z"), None);
        assert_eq!(paths.expanded(), 2);
        assert!(!paths.is_truncated());
    }

    #[test]
    fn test_discovery_order() {
        let paths = sample();
        let nodes: Vec<_> = paths.nodes().copied().collect();
        assert_eq!(nodes, vec!["a", "b", "c"]);
        let lens: Vec<_> = paths.iter().map(|(_, path)| path.len()).collect();
        assert_eq!(lens, vec![0, 1, 2]);
    }

    #[test]
    fn test_into_hash_map() {
        let map = sample().into_hash_map();
        assert_eq!(map.len(), 3);
        assert_eq!(map["a"], Vec::<&str>::new());
        assert_eq!(map["c"], vec!["b", "c"]);
    }

    #[test]
    fn test_serialize_and_debug() {
        let paths = sample();
        let json = serde_json::to_string(&paths).unwrap();
        assert_eq!(json, r#"[["a",[]],["b",["b"]],["c",["b","c"]]]"#);
        assert_eq!(format!("{paths:?}"), r#"{"a": [], "b": ["b"], "c": ["b", "c"]}"#);
    }

    #[test]
    fn test_lookup_uses_equivalence() {
        let folded = by_key(|s: &String| s.to_lowercase());
        let table = NodeTable::new(folded, "Root".to_string());
        let paths = ShortestPaths::new(table, 0, false);
        assert!(paths.contains(&"ROOT".to_string()));
        assert_eq!(paths.distance(&"root".to_string()), Some(0));
    }
}
