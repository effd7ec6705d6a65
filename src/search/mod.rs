//! Unweighted shortest paths over implicit graphs.
//!
//! The graph is never stored. The caller supplies an edge function mapping a
//! node to its outgoing neighbors, and the search asks for neighbors one node
//! at a time, breadth first:
//! - `shortest_path`: stop as soon as one target is reached
//! - `shortest_paths`: map every reachable node to its shortest path
//!
//! Both have `_by` variants that take an [`Equivalence`] and `try_` variants
//! whose edge function may fail. [`BreadthFirst`] bundles an equivalence with
//! [`SearchLimits`] for callers that need bounds.
//!
//! Among several shortest paths to a node, the one returned is the first
//! discovered, which follows the order the edge function yields neighbors.

mod bfs;
mod limits;
mod result;
mod table;

use core::convert::Infallible;

use crate::equivalence::{Equivalence, NaturalEquivalence};

use self::table::NodeTable;

pub use limits::{LimitsError, SearchLimits};
pub use result::{Iter, ShortestPaths};

/// A configured breadth-first search.
///
/// # Example
///
/// ```rust
/// use graph_paths::{BreadthFirst, SearchLimits};
///
/// let search = BreadthFirst::new()
///     .with_limits(SearchLimits::UNBOUNDED.with_max_depth(3))
///     .unwrap();
///
/// // Collatz-style successors: an infinite graph.
/// let edges = |n: &u64| vec![n * 2, n + 1];
///
/// assert_eq!(search.path(&1, &6, edges), Some(vec![2, 3, 6]));
/// assert_eq!(search.path(&1, &100, edges), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BreadthFirst<Q = NaturalEquivalence> {
    equivalence: Q,
    limits: SearchLimits,
}

impl BreadthFirst {
    /// An unbounded search using the nodes' own `Eq` and `Hash`.
    pub const fn new() -> Self {
        Self {
            equivalence: NaturalEquivalence,
            limits: SearchLimits::UNBOUNDED,
        }
    }
}

impl<Q> BreadthFirst<Q> {
    /// Replaces the node equivalence.
    pub fn with_equivalence<R>(self, equivalence: R) -> BreadthFirst<R> {
        BreadthFirst {
            equivalence,
            limits: self.limits,
        }
    }

    /// Replaces the search limits.
    ///
    /// # Errors
    /// Returns the error from [`SearchLimits::validate`].
    pub fn with_limits(mut self, limits: SearchLimits) -> Result<Self, LimitsError> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// The configured limits.
    #[inline]
    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Finds a shortest path from `start` to `target`.
    ///
    /// The returned nodes exclude `start` and end with `target`. If `start` is
    /// equivalent to `target` the path is empty and `edges` is not called.
    /// Returns `None` if `target` is unreachable or a limit ran out first.
    pub fn path<T, F, I>(&self, start: &T, target: &T, mut edges: F) -> Option<Vec<T>>
    where
        T: Clone,
        Q: Equivalence<T>,
        F: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        unwrap_infallible(self.try_path(start, target, |node| Ok(edges(node))))
    }

    /// Like [`BreadthFirst::path`] with a fallible edge function.
    ///
    /// # Errors
    /// Returns the first error produced by `edges`; the search stops there.
    pub fn try_path<T, F, I, E>(&self, start: &T, target: &T, edges: F) -> Result<Option<Vec<T>>, E>
    where
        T: Clone,
        Q: Equivalence<T>,
        F: FnMut(&T) -> Result<I, E>,
        I: IntoIterator<Item = T>,
    {
        check_node(&self.equivalence, start, "start");
        check_node(&self.equivalence, target, "target");

        if self.equivalence.equivalent(start, target) {
            return Ok(Some(Vec::new()));
        }

        let mut table = NodeTable::new(&self.equivalence, start.clone());
        let outcome = bfs::expand(&mut table, Some(target), self.limits, edges)?;
        Ok(outcome.found.map(|slot| table.path(slot).to_vec()))
    }

    /// Maps every node reachable from `start` to a shortest path.
    ///
    /// `edges` is called once per reachable node, so the reachable set must
    /// be finite unless a limit bounds the search.
    pub fn paths<T, F, I>(self, start: T, mut edges: F) -> ShortestPaths<T, Q>
    where
        T: Clone,
        Q: Equivalence<T>,
        F: FnMut(&T) -> I,
        I: IntoIterator<Item = T>,
    {
        unwrap_infallible(self.try_paths(start, |node| Ok(edges(node))))
    }

    /// Like [`BreadthFirst::paths`] with a fallible edge function.
    ///
    /// # Errors
    /// Returns the first error produced by `edges`; nothing discovered before
    /// it is kept.
    pub fn try_paths<T, F, I, E>(self, start: T, edges: F) -> Result<ShortestPaths<T, Q>, E>
    where
        T: Clone,
        Q: Equivalence<T>,
        F: FnMut(&T) -> Result<I, E>,
        I: IntoIterator<Item = T>,
    {
        check_node(&self.equivalence, &start, "start");

        let mut table = NodeTable::new(self.equivalence, start);
        let outcome = bfs::expand(&mut table, None, self.limits, edges)?;
        Ok(ShortestPaths::new(table, outcome.expanded, outcome.truncated))
    }
}

/// Finds a shortest path from `start` to `target`.
///
/// The result excludes `start` and ends with `target`; it is empty when
/// `start == target`, in which case `edges` is never called. `None` means
/// `target` is unreachable.
///
/// # Example
///
/// ```rust
/// use graph_paths::shortest_path;
///
/// let edges = |n: &char| match n {
///     'a' => vec!['b', 'c'],
///     'b' | 'c' => vec!['d'],
///     _ => vec![],
/// };
///
/// assert_eq!(shortest_path(&'a', &'d', edges), Some(vec!['b', 'd']));
/// assert_eq!(shortest_path(&'a', &'a', edges), Some(vec![]));
/// assert_eq!(shortest_path(&'d', &'a', edges), None);
/// ```
pub fn shortest_path<T, F, I>(start: &T, target: &T, edges: F) -> Option<Vec<T>>
where
    T: Eq + core::hash::Hash + Clone,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    BreadthFirst::new().path(start, target, edges)
}

/// [`shortest_path`] with a caller-supplied node equivalence.
pub fn shortest_path_by<T, F, I, Q>(
    start: &T,
    target: &T,
    edges: F,
    equivalence: Q,
) -> Option<Vec<T>>
where
    T: Clone,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
    Q: Equivalence<T>,
{
    BreadthFirst::new()
        .with_equivalence(equivalence)
        .path(start, target, edges)
}

/// [`shortest_path`] with a fallible edge function.
///
/// # Errors
/// Returns the first error produced by `edges`.
pub fn try_shortest_path<T, F, I, E>(start: &T, target: &T, edges: F) -> Result<Option<Vec<T>>, E>
where
    T: Eq + core::hash::Hash + Clone,
    F: FnMut(&T) -> Result<I, E>,
    I: IntoIterator<Item = T>,
{
    BreadthFirst::new().try_path(start, target, edges)
}

/// Maps every node reachable from `start`, start included, to its shortest
/// path.
///
/// # Example
///
/// ```rust
/// use graph_paths::shortest_paths;
///
/// let edges = |n: &char| match n {
///     'a' => vec!['b', 'c'],
///     'b' | 'c' => vec!['d'],
///     _ => vec![],
/// };
///
/// let paths = shortest_paths('a', edges);
/// assert_eq!(paths.len(), 4);
/// assert_eq!(paths.get(&'d'), Some(&['b', 'd'][..]));
/// assert!(!paths.contains(&'e'));
/// ```
pub fn shortest_paths<T, F, I>(start: T, edges: F) -> ShortestPaths<T>
where
    T: Eq + core::hash::Hash + Clone,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    BreadthFirst::new().paths(start, edges)
}

/// [`shortest_paths`] with a caller-supplied node equivalence.
pub fn shortest_paths_by<T, F, I, Q>(start: T, edges: F, equivalence: Q) -> ShortestPaths<T, Q>
where
    T: Clone,
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
    Q: Equivalence<T>,
{
    BreadthFirst::new()
        .with_equivalence(equivalence)
        .paths(start, edges)
}

/// [`shortest_paths`] with a fallible edge function.
///
/// # Errors
/// Returns the first error produced by `edges`.
pub fn try_shortest_paths<T, F, I, E>(start: T, edges: F) -> Result<ShortestPaths<T>, E>
where
    T: Eq + core::hash::Hash + Clone,
    F: FnMut(&T) -> Result<I, E>,
    I: IntoIterator<Item = T>,
{
    BreadthFirst::new().try_paths(start, edges)
}

/// Debug-build check that `node` is a usable key.
#[inline]
fn check_node<T, Q: Equivalence<T>>(equivalence: &Q, node: &T, argument: &str) {
    debug_assert!(
        equivalence.equivalent(node, node),
        "`{argument}` is not equivalent to itself"
    );
}

#[inline]
fn unwrap_infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
