//! `PathAccumulator` — an immutable, structurally-shared path.
//!
//! Each accumulator is either empty or a link holding the newest node and a
//! shared reference to the accumulator it was appended to. Any number of paths
//! may extend the same prefix; the prefix is stored once.
//!
//! Reading a path in forward order requires walking the chain backwards, so
//! the forward slice is built once per link and cached.

use core::fmt;
use core::iter::FusedIterator;
use std::sync::{Arc, OnceLock};

use serde::{Serialize, Serializer};

struct Link<T> {
    value: T,
    len: usize,
    prev: Option<Arc<Link<T>>>,
    materialized: OnceLock<Box<[T]>>,
}

impl<T: Clone> Link<T> {
    /// Builds the forward slice ending at this link.
    ///
    /// Walks predecessors iteratively into a buffer of exactly `len` slots and
    /// reverses it once. A predecessor that was already materialized ends the
    /// walk early and its cached slice is reused.
    fn collect_forward(&self) -> Box<[T]> {
        let mut buffer = Vec::with_capacity(self.len);
        let mut cursor = Some(self);

        while let Some(link) = cursor {
            if let Some(prefix) = link.materialized.get() {
                buffer.extend(prefix.iter().rev().cloned());
                break;
            }
            buffer.push(link.value.clone());
            cursor = link.prev.as_deref();
        }

        debug_assert_eq!(buffer.len(), self.len);
        buffer.reverse();
        buffer.into_boxed_slice()
    }
}

/// An immutable path built by appending one node at a time.
///
/// The empty accumulator stands for "no steps taken yet". Appending never
/// mutates the receiver: it returns a new accumulator that shares the
/// receiver's storage, so cloning and extending are both O(1).
///
/// # Example
///
/// ```rust
/// use graph_paths::PathAccumulator;
///
/// let root = PathAccumulator::empty();
/// let a = root.append('a');
/// let ab = a.append('b');
/// let ac = a.append('c');
///
/// assert_eq!(ab.materialize(), &['a', 'b']);
/// assert_eq!(ac.materialize(), &['a', 'c']);
/// assert_eq!(a.len(), 1);
/// ```
pub struct PathAccumulator<T> {
    head: Option<Arc<Link<T>>>,
}

impl<T> PathAccumulator<T> {
    /// Creates the empty path.
    #[inline]
    pub const fn empty() -> Self {
        Self { head: None }
    }

    /// Returns a new path made of this one followed by `value`.
    #[must_use]
    pub fn append(&self, value: T) -> Self {
        let link = Link {
            value,
            len: self.len() + 1,
            prev: self.head.clone(),
            materialized: OnceLock::new(),
        };
        Self {
            head: Some(Arc::new(link)),
        }
    }

    /// Number of appended nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |link| link.len)
    }

    /// Returns `true` for the empty path.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The most recently appended node.
    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.head.as_deref().map(|link| &link.value)
    }

    /// Iterates from the newest node back to the oldest without allocating.
    #[inline]
    pub fn iter_rev(&self) -> Steps<'_, T> {
        Steps {
            next: self.head.as_deref(),
            remaining: self.len(),
        }
    }
}

impl<T: Clone> PathAccumulator<T> {
    /// Returns the path in forward order, oldest node first.
    ///
    /// The first call on a given path costs O(len); the slice is cached and
    /// later calls (from any clone of this accumulator) are O(1).
    pub fn materialize(&self) -> &[T] {
        match &self.head {
            None => &[],
            Some(link) => &link.materialized.get_or_init(|| link.collect_forward())[..],
        }
    }

    /// Copies the forward-ordered path into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.materialize().to_vec()
    }
}

impl<T> Clone for PathAccumulator<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for PathAccumulator<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for PathAccumulator<T> {
    fn drop(&mut self) {
        // Unlink uniquely-owned links one at a time; the default drop would
        // recurse once per link.
        let mut next = self.head.take();
        while let Some(link) = next {
            next = Arc::into_inner(link).and_then(|mut link| link.prev.take());
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PathAccumulator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps: Vec<&T> = self.iter_rev().collect();
        steps.reverse();
        f.debug_list().entries(steps).finish()
    }
}

impl<T: Serialize> Serialize for PathAccumulator<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut steps: Vec<&T> = self.iter_rev().collect();
        steps.reverse();
        serializer.collect_seq(steps)
    }
}

/// Newest-to-oldest iterator over a [`PathAccumulator`].
pub struct Steps<'a, T> {
    next: Option<&'a Link<T>>,
    remaining: usize,
}

impl<'a, T> Iterator for Steps<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let link = self.next?;
        self.next = link.prev.as_deref();
        self.remaining -= 1;
        Some(&link.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Steps<'_, T> {}

impl<T> FusedIterator for Steps<'_, T> {}

impl<T> Clone for Steps<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path() {
        let path: PathAccumulator<u32> = PathAccumulator::empty();
        assert_eq!(path.len(), 0);
        assert!(path.is_empty());
        assert_eq!(path.last(), None);
        assert!(path.materialize().is_empty());
        assert_eq!(path.iter_rev().count(), 0);
    }

    #[test]
    fn test_append_does_not_mutate_receiver() {
        let a = PathAccumulator::empty().append(1);
        let ab = a.append(2);

        assert_eq!(a.len(), 1);
        assert_eq!(a.materialize(), &[1]);
        assert_eq!(ab.len(), 2);
        assert_eq!(ab.last(), Some(&2));
        assert_eq!(ab.materialize(), &[1, 2]);
    }

    #[test]
    fn test_siblings_share_prefix() {
        let prefix = PathAccumulator::empty().append("a").append("b");
        let left = prefix.append("c");
        let right = prefix.append("d");

        let left_prev = left.head.as_ref().and_then(|l| l.prev.as_ref()).unwrap();
        let right_prev = right.head.as_ref().and_then(|l| l.prev.as_ref()).unwrap();
        assert!(Arc::ptr_eq(left_prev, right_prev));
        assert!(Arc::ptr_eq(left_prev, prefix.head.as_ref().unwrap()));

        assert_eq!(left.materialize(), &["a", "b", "c"]);
        assert_eq!(right.materialize(), &["a", "b", "d"]);
    }

    #[test]
    fn test_materialize_is_cached() {
        let path = (0..16).fold(PathAccumulator::empty(), |p, i| p.append(i));
        let first = path.materialize().as_ptr();
        let second = path.materialize().as_ptr();
        assert_eq!(first, second);

        // Clones share the cache.
        let clone = path.clone();
        assert_eq!(clone.materialize().as_ptr(), first);
    }

    #[test]
    fn test_materialize_reuses_cached_prefix() {
        let prefix = (0..10).fold(PathAccumulator::empty(), |p, i| p.append(i));
        assert_eq!(prefix.materialize().len(), 10);

        let extended = prefix.append(10).append(11);
        let expected: Vec<i32> = (0..12).collect();
        assert_eq!(extended.materialize(), expected.as_slice());
    }

    #[test]
    fn test_iter_rev_order_and_size() {
        let path = PathAccumulator::empty().append('x').append('y').append('z');
        let mut steps = path.iter_rev();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps.next(), Some(&'z'));
        assert_eq!(steps.len(), 2);
        let rest: Vec<_> = steps.collect();
        assert_eq!(rest, vec![&'y', &'x']);
    }

    #[test]
    fn test_long_chain_materialize_and_drop() {
        const LEN: usize = 200_000;
        let mut path = PathAccumulator::empty();
        for i in 0..LEN {
            path = path.append(i);
        }
        assert_eq!(path.len(), LEN);

        let forward = path.materialize();
        assert_eq!(forward.len(), LEN);
        assert_eq!(forward[0], 0);
        assert_eq!(forward[LEN - 1], LEN - 1);

        // Dropping must not recurse through the chain.
        drop(path);
    }

    #[test]
    fn test_drop_keeps_shared_prefix_alive() {
        let prefix = PathAccumulator::empty().append(1).append(2);
        let extended = prefix.append(3);
        drop(prefix);
        assert_eq!(extended.materialize(), &[1, 2, 3]);
    }

    #[test]
    fn test_debug_and_serialize() {
        let path = PathAccumulator::empty().append(1).append(2);
        assert_eq!(format!("{path:?}"), "[1, 2]");
        assert_eq!(serde_json::to_string(&path).unwrap(), "[1,2]");
    }
}
