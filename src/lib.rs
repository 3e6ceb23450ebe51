//! ordered-collections: insertion-ordered map and set with order-preserving
//! deletion, plus a few string helpers built on top of them.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: hash-keyed lookup with deterministic insertion order, where
//!   deleting (one key or a batch) keeps both the order and the key→position
//!   index consistent.
//! - Layers:
//!   - `compaction`: one linear pass over dense storage that skips a sorted
//!     set of removed positions and reports every survivor move.
//!   - OrderedMap<K, V, S>: parallel `keys`/`values`/hash vectors at dense
//!     positions plus a `HashTable<usize>` index; drives `compaction` for
//!     batched deletes.
//!   - OrderedSet<T, S>: `OrderedMap<T, ()>` with add-only semantics.
//!   - Text / StringList: stateless string helpers (case conversion,
//!     pluralization, word splitting with abbreviation normalization).
//!
//! Constraints
//! - Positions are always exactly `0..len`; `keys[p]`, `values[p]` and the
//!   stored hash at `p` describe the same entry.
//! - "First write wins position, last write wins value": re-setting a key
//!   overwrites it in place, new keys append.
//! - Single delete is O(n); `delete_many` is O(n + k log k) and short-circuits
//!   on an empty map or an empty key list.
//! - No internal synchronization. Containers are `Send`/`Sync` whenever their
//!   keys, values and hasher are; mutation needs `&mut`, so sharing across
//!   threads goes through `Arc`, `Mutex` or `RwLock`.
//!
//! Hashing and reindexing
//! - Each entry stores its precomputed `u64` hash. Reindexing after a delete
//!   locates index slots by stored hash and position equality only, so
//!   `K: Hash`/`K: Eq` never run while positions are being rewritten.
//! - `K: Hash`/`K: Eq` do run while probing on lookup and insert. Such user
//!   code may read the same map through `&self`; mutating it is ruled out by
//!   the borrow checker.
//!
//! Equality
//! - Map and set equality ignore order. Values are compared with
//!   `V: PartialEq`, so composite values get structural equality from
//!   `#[derive(PartialEq)]`; there is no runtime type inspection.
//!
//! Iteration
//! - `iter`, `keys`, `values`, `list` and `walk` all follow insertion order.
//!   `walk` stops early when its callback returns `false`.
//!
//! Decoding (feature `serde`, on by default)
//! - Maps decode from map nodes and sets from sequence nodes, in document
//!   order. A failing element aborts the decode and the partial container is
//!   dropped.
//!
//! Notes and non-goals
//! - No concurrency control, persistence or I/O.
//! - OrderedSet has no delete; elements never move once added.

mod collection;
mod compaction;
pub mod error;
pub mod ordered_map;
#[cfg(test)]
mod ordered_map_proptest;
pub mod ordered_set;
#[cfg(feature = "serde")]
mod serde_impls;
pub mod strings;
pub mod text;

// Public surface
pub use collection::Collection;
pub use error::{Error, Result};
pub use ordered_map::OrderedMap;
pub use ordered_set::OrderedSet;
pub use strings::StringList;
pub use text::{ScanValue, SplitWord, Text};
