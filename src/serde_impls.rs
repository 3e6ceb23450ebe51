//! serde support: maps decode from map nodes and sets from sequence nodes,
//! both keeping document order.

use crate::error::Error;
use crate::ordered_map::OrderedMap;
use crate::ordered_set::OrderedSet;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

// Size hints come from the input; cap the up-front allocation.
fn cautious(hint: Option<usize>) -> usize {
    hint.unwrap_or(0).min(4096)
}

impl<K, V, S> Serialize for OrderedMap<K, V, S>
where
    K: Serialize,
    V: Serialize,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V, S>(PhantomData<OrderedMap<K, V, S>>);

impl<'de, K, V, S> Visitor<'de> for OrderedMapVisitor<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    type Value = OrderedMap<K, V, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let capacity = cautious(access.size_hint());
        let mut map = OrderedMap::with_capacity_and_hasher(capacity, S::default());
        while let Some((k, v)) = access.next_entry()? {
            map.set(k, v);
        }
        Ok(map)
    }
}

impl<'de, K, V, S> Deserialize<'de> for OrderedMap<K, V, S>
where
    K: Deserialize<'de> + Eq + Hash,
    V: Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

impl<T, S> Serialize for OrderedSet<T, S>
where
    T: Serialize,
{
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for item in self {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct OrderedSetVisitor<T, S>(PhantomData<OrderedSet<T, S>>);

impl<'de, T, S> Visitor<'de> for OrderedSetVisitor<T, S>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    type Value = OrderedSet<T, S>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let capacity = cautious(seq.size_hint());
        let mut set = OrderedSet::with_capacity_and_hasher(capacity, S::default());
        while let Some(item) = seq.next_element()? {
            set.add(item);
        }
        Ok(set)
    }
}

impl<'de, T, S> Deserialize<'de> for OrderedSet<T, S>
where
    T: Deserialize<'de> + Eq + Hash,
    S: BuildHasher + Default,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(OrderedSetVisitor(PhantomData))
    }
}

impl<T, S> OrderedSet<T, S>
where
    T: Eq + Hash,
    S: BuildHasher + Default,
{
    /// Decodes a set from a sequence-shaped node of any serde format.
    ///
    /// Fails with [`Error::Decode`] if the node is not a sequence or any
    /// element fails to decode. Nothing is returned on failure: elements
    /// decoded before the failing one are discarded with the partial set.
    pub fn decode<'de, D>(deserializer: D) -> Result<Self, Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Self::deserialize(deserializer).map_err(|e| {
            debug!(error = %e, "ordered set decode failed");
            Error::Decode(e.to_string())
        })
    }
}
