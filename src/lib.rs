//! # `graph-paths` - Shortest Paths over Implicit Graphs
//!
//! Breadth-first shortest paths (by edge count) over graphs that are never
//! stored. The caller describes the graph with an edge function mapping a
//! node to its outgoing neighbors; the search calls it lazily, once per
//! discovered node, and stops as soon as it has an answer.
//!
//! ## Guarantees
//!
//! - **Shortest**: every returned path has the fewest edges of any path to its
//!   node. Among equally short paths the first discovered wins, which follows
//!   the order the edge function yields neighbors.
//! - **Lazy**: `edges` is called at most once per discovered node, never for
//!   an identity query, and neighbors past a found target are not pulled.
//! - **No shared state**: all state lives in one call. Queries may run
//!   concurrently on different threads when the supplied closures allow it.
//! - **Propagating**: a panic in a closure unwinds through the search; an
//!   error from a fallible edge function is returned as-is and the partial
//!   result is dropped.
//!
//! ## Architecture
//!
//! 1. **Path accumulators** (`PathAccumulator<T>`):
//!    - Immutable chain of shared links, one per appended node
//!    - O(1) append and length; paths with a common prefix share it
//!    - Forward order materialized on demand (iteratively) and cached
//!
//! 2. **Node equivalence** (`Equivalence<T>`):
//!    - Strategy value supplying equality and hashing
//!    - `NaturalEquivalence` for `Eq + Hash` nodes, `from_fns` and `by_key`
//!      for everything else
//!
//! 3. **Breadth-first engine** (`BreadthFirst`, `shortest_path`, `shortest_paths`):
//!    - FIFO frontier over a discovery-ordered distance map
//!    - Early exit for single-target queries
//!    - Optional `SearchLimits` for depth and node budgets
//!
//! ## Example
//!
//! ```rust
//! use graph_paths::{shortest_path, shortest_paths};
//!
//! // A 10x10 grid where each cell steps right or down.
//! let edges = |&(x, y): &(u8, u8)| {
//!     let mut next = Vec::new();
//!     if x < 9 { next.push((x + 1, y)); }
//!     if y < 9 { next.push((x, y + 1)); }
//!     next
//! };
//!
//! let path = shortest_path(&(0, 0), &(2, 1), edges).unwrap();
//! assert_eq!(path, vec![(1, 0), (2, 0), (2, 1)]);
//!
//! let all = shortest_paths((0, 0), edges);
//! assert_eq!(all.len(), 100);
//! assert_eq!(all.distance(&(9, 9)), Some(18));
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod equivalence;
pub mod path;
pub mod search;

pub use equivalence::{
    by_key, from_fns, Equivalence, FnEquivalence, KeyEquivalence, NaturalEquivalence,
};
pub use path::PathAccumulator;
pub use search::{
    shortest_path, shortest_path_by, shortest_paths, shortest_paths_by, try_shortest_path,
    try_shortest_paths, BreadthFirst, LimitsError, SearchLimits, ShortestPaths,
};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // The default equivalence is a ZST.
    assert!(mem::size_of::<NaturalEquivalence>() == 0);

    // An accumulator is a single nullable pointer.
    assert!(mem::size_of::<PathAccumulator<u64>>() == mem::size_of::<usize>());
    assert!(mem::size_of::<PathAccumulator<[u8; 64]>>() == mem::size_of::<usize>());

    // The search configuration carries no per-node state.
    assert!(mem::size_of::<BreadthFirst>() == mem::size_of::<SearchLimits>());
};
