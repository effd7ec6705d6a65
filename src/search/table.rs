//! Discovery-ordered node table keyed through an [`Equivalence`].
//!
//! `std::collections::HashMap` only understands `Eq + Hash`, so the distance
//! map is stored as a dense entry vector plus an index from strategy hash to
//! the slots carrying that hash. Slots are never removed; a slot number is the
//! node's discovery rank.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::equivalence::Equivalence;
use crate::path::PathAccumulator;

/// One discovered node and the path that first reached it.
pub(crate) struct Entry<T> {
    pub(crate) node: T,
    pub(crate) path: PathAccumulator<T>,
}

pub(crate) struct NodeTable<T, Q> {
    equivalence: Q,
    entries: Vec<Entry<T>>,
    buckets: FxHashMap<u64, SmallVec<[usize; 1]>>,
}

impl<T, Q: Equivalence<T>> NodeTable<T, Q> {
    /// Creates a table holding only `start`, mapped to the empty path.
    pub(crate) fn new(equivalence: Q, start: T) -> Self {
        let mut table = Self {
            equivalence,
            entries: Vec::new(),
            buckets: FxHashMap::default(),
        };
        let hash = table.hash(&start);
        table.insert_unique(hash, start, PathAccumulator::empty());
        table
    }

    #[inline]
    pub(crate) fn hash(&self, node: &T) -> u64 {
        self.equivalence.hash(node)
    }

    #[inline]
    pub(crate) fn equivalent(&self, a: &T, b: &T) -> bool {
        self.equivalence.equivalent(a, b)
    }

    pub(crate) fn find(&self, node: &T) -> Option<usize> {
        self.find_hashed(self.hash(node), node)
    }

    /// Looks `node` up with a hash the caller already computed.
    pub(crate) fn find_hashed(&self, hash: u64, node: &T) -> Option<usize> {
        self.buckets.get(&hash)?.iter().copied().find(|&slot| {
            self.equivalence.equivalent(&self.entries[slot].node, node)
        })
    }

    /// Appends a node known to be absent and returns its slot.
    pub(crate) fn insert_unique(&mut self, hash: u64, node: T, path: PathAccumulator<T>) -> usize {
        debug_assert!(self.find_hashed(hash, &node).is_none());
        let slot = self.entries.len();
        self.entries.push(Entry { node, path });
        self.buckets.entry(hash).or_default().push(slot);
        slot
    }
}

impl<T, Q> NodeTable<T, Q> {
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn node(&self, slot: usize) -> &T {
        &self.entries[slot].node
    }

    #[inline]
    pub(crate) fn path(&self, slot: usize) -> &PathAccumulator<T> {
        &self.entries[slot].path
    }

    #[inline]
    pub(crate) fn entries(&self) -> &[Entry<T>] {
        &self.entries
    }

    #[inline]
    pub(crate) fn equivalence(&self) -> &Q {
        &self.equivalence
    }

    pub(crate) fn into_entries(self) -> Vec<Entry<T>> {
        self.entries
    }
}
