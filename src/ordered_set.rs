//! OrderedSet: insertion-ordered set layered on `OrderedMap<T, ()>`.

use crate::collection::Collection;
use crate::ordered_map::OrderedMap;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// An insertion-ordered set.
///
/// Adding an element that is already present is a no-op, so the first
/// occurrence fixes its position. Elements never move: the set has no delete
/// operation. Equality is plain set equality and ignores order.
#[derive(Clone)]
pub struct OrderedSet<T, S = RandomState> {
    map: OrderedMap<T, (), S>,
}

impl<T> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            map: OrderedMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: OrderedMap::with_capacity(capacity),
        }
    }
}

impl<T, S: Default> Default for OrderedSet<T, S> {
    fn default() -> Self {
        Self {
            map: OrderedMap::default(),
        }
    }
}

impl<T, S> OrderedSet<T, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            map: OrderedMap::with_hasher(hasher),
        }
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            map: OrderedMap::with_capacity_and_hasher(capacity, hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        self.map.is_not_empty()
    }

    /// Elements in insertion order.
    pub fn list(&self) -> &[T] {
        self.map.keys()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.list().iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.list().first()
    }

    /// First element, or `T::default()` for an empty set.
    pub fn first_or_default(&self) -> T
    where
        T: Clone + Default,
    {
        self.first().cloned().unwrap_or_default()
    }

    /// Visits elements in insertion order until `f` returns `false`.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.map.walk(|item, _| f(item));
    }
}

impl<T, S> OrderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    /// Appends `value` unless it is already a member. Returns whether it was
    /// inserted.
    pub fn add(&mut self, value: T) -> bool {
        self.map.insert_if_absent(value, ())
    }

    pub fn has<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.has(value)
    }

    /// Position of `value` in insertion order.
    pub fn position<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.position(value)
    }

    /// Returns a new set: `self` in its own order, followed by the elements of
    /// `other` that are not already present, in `other`'s order.
    pub fn merge(&self, other: &Self) -> Self
    where
        T: Clone,
        S: Clone,
    {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }

    /// Set equality: same cardinality and same members.
    pub fn equal(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.has(item))
    }
}

impl<T, S> PartialEq for OrderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<T, S> Eq for OrderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
}

impl<T: fmt::Debug, S> fmt::Debug for OrderedSet<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> FromIterator<T> for OrderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, S> Extend<T> for OrderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for OrderedSet<T>
where
    T: Eq + Hash,
{
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}

impl<T, S> Collection for OrderedSet<T, S> {
    type Item = T;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn list(&self) -> &[T] {
        self.map.keys()
    }
}

impl<'a, T, S> IntoIterator for &'a OrderedSet<T, S> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> IntoIterator for OrderedSet<T, S> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.map.into_keys()
    }
}
