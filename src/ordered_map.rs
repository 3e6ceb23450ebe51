//! OrderedMap: insertion-ordered map over dense, parallel backing vectors.

use crate::collection::Collection;
use crate::compaction;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use hashbrown::hash_table::Entry as TableEntry;
use hashbrown::HashTable;
use std::collections::hash_map::RandomState;
use tracing::trace;

/// An insertion-ordered hash map.
///
/// Entries live in three parallel vectors (`keys`, `values` and the stored key
/// hashes) at dense positions `0..len`. A `HashTable<usize>` maps each key to
/// its position. A new key is appended; re-setting an existing key overwrites
/// the key slot and value in place, so the position never moves.
///
/// Deleting shifts every later entry down by one and rewrites its position in
/// the index, which costs O(n). [`delete_many`](Self::delete_many) removes a
/// whole batch in one compaction pass, O(n + k log k) for `k` keys.
///
/// Equality ignores order: two maps are equal when they hold the same keys
/// with equal values.
///
/// The map has no internal synchronization. It is `Send` and `Sync` when its
/// parts are, so it can sit behind an `Arc` or a `RwLock`.
#[derive(Clone)]
pub struct OrderedMap<K, V, S = RandomState> {
    hasher: S,
    index: HashTable<usize>,
    keys: Vec<K>,
    values: Vec<V>,
    hashes: Vec<u64>,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S: Default> Default for OrderedMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> OrderedMap<K, V, S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(0, hasher)
    }

    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            index: HashTable::with_capacity(capacity),
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            hashes: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values in insertion order, aligned with [`keys`](Self::keys).
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Same as [`values`](Self::values).
    pub fn list(&self) -> &[V] {
        &self.values
    }

    pub fn into_keys(self) -> std::vec::IntoIter<K> {
        self.keys.into_iter()
    }

    pub fn into_values(self) -> std::vec::IntoIter<V> {
        self.values.into_iter()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.keys.iter().zip(self.values.iter()),
        }
    }

    /// Iterates in insertion order with mutable access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.keys.iter().zip(self.values.iter_mut()),
        }
    }

    /// Visits every entry in insertion order until `f` returns `false`.
    pub fn walk<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in self.iter() {
            if !f(k, v) {
                return;
            }
        }
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.keys.clear();
        self.values.clear();
        self.hashes.clear();
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Removes the positions in `removed` (sorted, unique, in bounds) from the
    /// index and the backing vectors, rewriting every shifted survivor.
    ///
    /// Only stored hashes and position equality are used, so no user code
    /// runs while the index is being rewritten.
    fn remove_positions(&mut self, removed: &[usize]) {
        let Self {
            index,
            keys,
            values,
            hashes,
            ..
        } = self;

        for &p in removed {
            index
                .find_entry(hashes[p], |&q| q == p)
                .expect("removed position must be indexed")
                .remove();
        }

        let new_len = compaction::compact(keys.len(), removed, |from, to| {
            keys.swap(from, to);
            values.swap(from, to);
            hashes.swap(from, to);
            *index
                .find_mut(hashes[to], |&q| q == from)
                .expect("surviving position must be indexed") = to;
        });

        hashes.truncate(new_len);
        keys.truncate(new_len);
        values.truncate(new_len);
    }

    /// Checks the structural invariants in debug builds.
    ///
    /// Lengths agree, and every position `0..len` is reachable from the index
    /// through its stored hash.
    pub(crate) fn debug_assert_invariants(&self) {
        if cfg!(debug_assertions) {
            self.assert_invariants();
        }
    }

    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.keys.len(), self.values.len());
        assert_eq!(self.keys.len(), self.hashes.len());
        assert_eq!(self.keys.len(), self.index.len());
        for (p, &hash) in self.hashes.iter().enumerate() {
            assert!(
                self.index.find(hash, |&q| q == p).is_some(),
                "position {p} missing from index"
            );
        }
    }
}

impl<K, V, S> OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Builds a map from pairs that carry no order of their own, such as a
    /// `HashMap`. The result follows the iteration order of `pairs`.
    pub fn from_unordered<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        S: Default,
    {
        pairs.into_iter().collect()
    }

    /// Current position of `key` in insertion order.
    pub fn position<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.is_empty() {
            return None;
        }
        let hash = self.hasher.hash_one(key);
        self.index
            .find(hash, |&p| self.keys[p].borrow() == key)
            .copied()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let p = self.position(key)?;
        Some(&self.values[p])
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let p = self.position(key)?;
        Some(&mut self.values[p])
    }

    /// Returns a copy of the value for `key`, or `V::default()` if absent.
    pub fn get_or_default<Q>(&self, key: &Q) -> V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone + Default,
    {
        self.get(key).cloned().unwrap_or_default()
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let p = self.position(key)?;
        Some((&self.keys[p], &self.values[p]))
    }

    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.position(key).is_some()
    }

    /// Inserts or updates `key`.
    ///
    /// - New key: appended at the end; returns `None`.
    /// - Existing key: the stored key and value are both replaced in place and
    ///   the old value is returned. The position does not change.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hasher.hash_one(&key);
        let Self {
            index,
            keys,
            values,
            hashes,
            ..
        } = self;

        match index.entry(hash, |&p| keys[p] == key, |&p| hashes[p]) {
            TableEntry::Occupied(entry) => {
                let p = *entry.get();
                keys[p] = key;
                Some(mem::replace(&mut values[p], value))
            }
            TableEntry::Vacant(entry) => {
                entry.insert(keys.len());
                keys.push(key);
                values.push(value);
                hashes.push(hash);
                None
            }
        }
    }

    /// Appends `key` unless it is already present, with a single probe.
    /// Returns whether it was inserted; an existing entry is left untouched.
    pub(crate) fn insert_if_absent(&mut self, key: K, value: V) -> bool {
        let hash = self.hasher.hash_one(&key);
        let Self {
            index,
            keys,
            values,
            hashes,
            ..
        } = self;

        match index.entry(hash, |&p| keys[p] == key, |&p| hashes[p]) {
            TableEntry::Occupied(_) => false,
            TableEntry::Vacant(entry) => {
                entry.insert(keys.len());
                keys.push(key);
                values.push(value);
                hashes.push(hash);
                true
            }
        }
    }

    /// Removes `key`, shifting every later entry down by one position.
    ///
    /// Returns the removed value, or `None` (leaving the map untouched) if the
    /// key is absent.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let p = self.position(key)?;
        let Self {
            index,
            keys,
            values,
            hashes,
            ..
        } = self;

        index
            .find_entry(hashes[p], |&q| q == p)
            .expect("live position must be indexed")
            .remove();
        hashes.remove(p);
        keys.remove(p);
        let value = values.remove(p);
        for (q, &hash) in hashes.iter().enumerate().skip(p) {
            *index
                .find_mut(hash, |&r| r == q + 1)
                .expect("shifted position must be indexed") = q;
        }

        self.debug_assert_invariants();
        Some(value)
    }

    /// Removes every listed key in one compaction pass.
    ///
    /// Keys are resolved to positions first; absent and repeated keys are
    /// ignored. Returns how many entries were removed. An empty map or an empty
    /// key list returns immediately without allocating.
    pub fn delete_many<'q, Q, I>(&mut self, keys: I) -> usize
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        if self.is_empty() {
            return 0;
        }
        let mut keys = keys.into_iter().peekable();
        if keys.peek().is_none() {
            return 0;
        }

        let mut removed: Vec<usize> = keys.filter_map(|k| self.position(k)).collect();
        if removed.is_empty() {
            return 0;
        }
        compaction::normalize(&mut removed);

        let before = self.len();
        self.remove_positions(&removed);
        trace!(
            removed = removed.len(),
            before,
            after = self.len(),
            "compacted ordered map"
        );

        self.debug_assert_invariants();
        removed.len()
    }

    /// Retains only the listed keys, reordered to follow `keys`.
    ///
    /// Absent keys are skipped; a repeated key keeps its first occurrence.
    pub fn keep<'q, Q, I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        let order = self.kept_positions(keys);

        let mut slots: Vec<Option<(K, V, u64)>> = mem::take(&mut self.keys)
            .into_iter()
            .zip(mem::take(&mut self.values))
            .zip(mem::take(&mut self.hashes))
            .map(|((k, v), h)| Some((k, v, h)))
            .collect();
        let before = slots.len();

        let Self {
            index,
            keys,
            values,
            hashes,
            ..
        } = self;
        index.clear();
        keys.reserve(order.len());
        values.reserve(order.len());
        hashes.reserve(order.len());
        for p in order {
            let (k, v, h) = slots[p].take().expect("kept positions are unique");
            index.insert_unique(h, keys.len(), |&q| hashes[q]);
            keys.push(k);
            values.push(v);
            hashes.push(h);
        }
        trace!(before, after = keys.len(), "kept ordered map subset");

        self.debug_assert_invariants();
        // Dropped entries go out of scope here.
        drop(slots);
    }

    /// Returns a new map holding only the listed keys, in the order of `keys`.
    pub fn clone_and_keep<'q, Q, I>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q> + Clone,
        V: Clone,
        Q: ?Sized + Hash + Eq + 'q,
        S: Clone,
    {
        let order = self.kept_positions(keys);
        let mut out = Self::with_capacity_and_hasher(order.len(), self.hasher.clone());
        for p in order {
            let hash = self.hashes[p];
            out.index.insert_unique(hash, out.keys.len(), |&q| out.hashes[q]);
            out.keys.push(self.keys[p].clone());
            out.values.push(self.values[p].clone());
            out.hashes.push(hash);
        }
        out
    }

    fn kept_positions<'q, Q, I>(&self, keys: I) -> Vec<usize>
    where
        I: IntoIterator<Item = &'q Q>,
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        let mut seen = vec![false; self.len()];
        keys.into_iter()
            .filter_map(|k| self.position(k))
            .filter(|&p| !mem::replace(&mut seen[p], true))
            .collect()
    }

    /// Order-insensitive equality: same key set, equal value per key.
    pub fn equal(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V, S> PartialEq for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<K, V, S> Eq for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for OrderedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> FromIterator<(K, V)> for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for OrderedMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let Self {
            index,
            keys,
            values,
            hashes,
            ..
        } = self;
        index.reserve(lower, |&p| hashes[p]);
        keys.reserve(lower);
        values.reserve(lower);
        hashes.reserve(lower);
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OrderedMap<K, V>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V, S> Collection for OrderedMap<K, V, S> {
    type Item = V;

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn list(&self) -> &[V] {
        &self.values
    }
}

/// Iterator over `(&K, &V)` in insertion order.
pub struct Iter<'a, K, V> {
    it: core::iter::Zip<core::slice::Iter<'a, K>, core::slice::Iter<'a, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.it.next_back()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` in insertion order.
pub struct IterMut<'a, K, V> {
    it: core::iter::Zip<core::slice::Iter<'a, K>, core::slice::IterMut<'a, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` in insertion order.
pub struct IntoIter<K, V> {
    it: core::iter::Zip<std::vec::IntoIter<K>, std::vec::IntoIter<V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.it.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<'a, K, V, S> IntoIterator for &'a OrderedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OrderedMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for OrderedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            it: self.keys.into_iter().zip(self.values),
        }
    }
}
