//! Pluggable node identity.
//!
//! The traversal never relies on `T: Eq + Hash` directly. It asks an
//! [`Equivalence`] strategy whether two nodes are the same and what a node
//! hashes to. This lets callers merge distinct representations of one vertex
//! (case-insensitive names, normalized coordinates, ...) without wrapping every
//! node in a newtype.
//!
//! Implementations must keep the two operations consistent: nodes that are
//! equivalent must produce the same hash. A strategy that breaks this makes
//! the traversal's results undefined; it is not detected.

use core::fmt;
use core::hash::{BuildHasher, BuildHasherDefault, Hash};

use rustc_hash::FxHasher;

/// Equality and hashing for graph nodes.
pub trait Equivalence<T: ?Sized> {
    /// Returns `true` if `a` and `b` denote the same node.
    fn equivalent(&self, a: &T, b: &T) -> bool;

    /// Hashes `node`. Equivalent nodes must hash equally.
    fn hash(&self, node: &T) -> u64;
}

impl<T: ?Sized, Q: Equivalence<T> + ?Sized> Equivalence<T> for &Q {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (**self).equivalent(a, b)
    }

    #[inline]
    fn hash(&self, node: &T) -> u64 {
        (**self).hash(node)
    }
}

/// The node type's own `Eq` and `Hash`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NaturalEquivalence;

impl<T: Eq + Hash + ?Sized> Equivalence<T> for NaturalEquivalence {
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, node: &T) -> u64 {
        BuildHasherDefault::<FxHasher>::default().hash_one(node)
    }
}

/// An equivalence assembled from a pair of closures.
///
/// Built with [`from_fns`].
#[derive(Clone, Copy)]
pub struct FnEquivalence<E, H> {
    equals: E,
    hash: H,
}

/// Builds an [`Equivalence`] from an equality function and a hash function.
///
/// Both must agree: `equals(a, b)` implies `hash(a) == hash(b)`.
///
/// # Example
///
/// ```rust
/// use graph_paths::{from_fns, Equivalence};
///
/// let parity = from_fns(|a: &u32, b: &u32| a % 2 == b % 2, |n: &u32| u64::from(n % 2));
/// assert!(parity.equivalent(&3, &7));
/// assert_eq!(parity.hash(&3), parity.hash(&7));
/// ```
pub fn from_fns<T, E, H>(equals: E, hash: H) -> FnEquivalence<E, H>
where
    T: ?Sized,
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    FnEquivalence { equals, hash }
}

impl<T, E, H> Equivalence<T> for FnEquivalence<E, H>
where
    T: ?Sized,
    E: Fn(&T, &T) -> bool,
    H: Fn(&T) -> u64,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.equals)(a, b)
    }

    #[inline]
    fn hash(&self, node: &T) -> u64 {
        (self.hash)(node)
    }
}

impl<E, H> fmt::Debug for FnEquivalence<E, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnEquivalence").finish_non_exhaustive()
    }
}

/// An equivalence that compares and hashes a projected key.
///
/// Built with [`by_key`]. Equality and hash come from the same key, so they
/// are consistent by construction.
#[derive(Clone, Copy)]
pub struct KeyEquivalence<F> {
    key: F,
}

/// Identifies nodes by the key `key` extracts from them.
///
/// # Example
///
/// ```rust
/// use graph_paths::{by_key, Equivalence};
///
/// let folded = by_key(|s: &String| s.to_ascii_lowercase());
/// assert!(folded.equivalent(&"Node".to_string(), &"NODE".to_string()));
/// ```
pub fn by_key<T, K, F>(key: F) -> KeyEquivalence<F>
where
    T: ?Sized,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    KeyEquivalence { key }
}

impl<T, K, F> Equivalence<T> for KeyEquivalence<F>
where
    T: ?Sized,
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    #[inline]
    fn equivalent(&self, a: &T, b: &T) -> bool {
        (self.key)(a) == (self.key)(b)
    }

    #[inline]
    fn hash(&self, node: &T) -> u64 {
        Equivalence::<K>::hash(&NaturalEquivalence, &(self.key)(node))
    }
}

impl<F> fmt::Debug for KeyEquivalence<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEquivalence").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_equivalence() {
        let eq = NaturalEquivalence;
        assert!(eq.equivalent(&"a", &"a"));
        assert!(!eq.equivalent(&"a", &"b"));
        assert_eq!(Equivalence::<str>::hash(&eq, "a"), Equivalence::<str>::hash(&eq, "a"));
    }

    #[test]
    fn test_fn_equivalence() {
        let mod3 = from_fns(|a: &i64, b: &i64| a.rem_euclid(3) == b.rem_euclid(3), |n: &i64| {
            n.rem_euclid(3).unsigned_abs()
        });
        assert!(mod3.equivalent(&-1, &2));
        assert_eq!(mod3.hash(&-1), mod3.hash(&2));
        assert!(!mod3.equivalent(&1, &2));
    }

    #[test]
    fn test_key_equivalence_is_consistent() {
        let first_char = by_key(|s: &str| s.chars().next());
        assert!(first_char.equivalent("apple", "avocado"));
        assert_eq!(first_char.hash("apple"), first_char.hash("avocado"));
        assert!(!first_char.equivalent("apple", "banana"));
    }

    #[test]
    fn test_reference_forwards() {
        let eq = by_key(|n: &u8| n / 10);
        let by_ref = &eq;
        assert!(by_ref.equivalent(&11, &19));
        assert_eq!(by_ref.hash(&11), eq.hash(&19));
    }
}
