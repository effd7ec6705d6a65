//! Persistent path representation used by the traversal engine.
//!
//! A path is grown one node at a time during a breadth-first search. Copying
//! the whole prefix on every step would make traversal quadratic in path
//! length, so paths are stored as an immutable chain of shared links instead:
//! - `PathAccumulator`: the chain handle (O(1) append, O(1) length)
//! - `Steps`: a borrowing newest-to-oldest walk over a chain

mod accumulator;

pub use accumulator::{PathAccumulator, Steps};
