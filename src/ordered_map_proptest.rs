#![cfg(test)]

// Property tests for OrderedMap kept inside the crate so they can check the
// internal index invariants after every step.

use crate::ordered_map::OrderedMap;
use proptest::prelude::*;
use std::fmt;
use std::hash::{BuildHasher, Hasher};

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Set(usize, i32),
    Delete(usize),
    DeleteMany(Vec<usize>),
    Keep(Vec<usize>),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=8).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Set(i, v)),
            1 => idx.clone().prop_map(OpI::Delete),
            1 => proptest::collection::vec(idx.clone(), 0..6).prop_map(OpI::DeleteMany),
            1 => proptest::collection::vec(idx.clone(), 0..6).prop_map(OpI::Keep),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..60).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn model_position(model: &[(Key, i32)], k: &Key) -> Option<usize> {
    model.iter().position(|(mk, _)| mk == k)
}

fn apply<S: BuildHasher>(
    sut: &mut OrderedMap<Key, i32, S>,
    model: &mut Vec<(Key, i32)>,
    pool: &[String],
    op: OpI,
) -> Result<(), TestCaseError> {
    match op {
        OpI::Set(i, v) => {
            let k = key_from(pool, i);
            let prev = sut.set(k.clone(), v);
            match model_position(model, &k) {
                Some(p) => {
                    prop_assert_eq!(prev, Some(model[p].1));
                    model[p].1 = v;
                }
                None => {
                    prop_assert_eq!(prev, None);
                    model.push((k, v));
                }
            }
        }
        OpI::Delete(i) => {
            let k = key_from(pool, i);
            let removed = sut.delete(&k);
            match model_position(model, &k) {
                Some(p) => prop_assert_eq!(removed, Some(model.remove(p).1)),
                None => prop_assert_eq!(removed, None),
            }
        }
        OpI::DeleteMany(is) => {
            let ks: Vec<Key> = is.iter().map(|&i| key_from(pool, i)).collect();
            let n = sut.delete_many(&ks);
            let before = model.len();
            model.retain(|(mk, _)| !ks.contains(mk));
            prop_assert_eq!(n, before - model.len());
        }
        OpI::Keep(is) => {
            let ks: Vec<Key> = is.iter().map(|&i| key_from(pool, i)).collect();
            sut.keep(&ks);
            let mut kept: Vec<(Key, i32)> = Vec::new();
            for k in ks {
                if kept.iter().any(|(mk, _)| *mk == k) {
                    continue;
                }
                if let Some(p) = model_position(model, &k) {
                    kept.push(model[p].clone());
                }
            }
            *model = kept;
        }
        OpI::Get(i) => {
            let k = key_from(pool, i);
            let expected = model_position(model, &k).map(|p| model[p].1);
            prop_assert_eq!(sut.get(&k).copied(), expected);
            prop_assert_eq!(sut.position(&k), model_position(model, &k));
        }
        OpI::Contains(s) => {
            let has_model = model.iter().any(|(k, _)| k.0 == s);
            prop_assert_eq!(sut.has(s.as_str()), has_model);
        }
        OpI::Mutate(i, d) => {
            let k = key_from(pool, i);
            if let Some(p) = model_position(model, &k) {
                let v = sut.get_mut(&k).expect("live key must resolve");
                *v = v.saturating_add(d);
                model[p].1 = model[p].1.saturating_add(d);
            } else {
                prop_assert!(sut.get_mut(&k).is_none());
            }
        }
        OpI::Iterate => {
            let seen: Vec<(Key, i32)> = sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
            prop_assert_eq!(&seen, &*model);
        }
    }
    Ok(())
}

fn check_parity<S: BuildHasher>(
    sut: &OrderedMap<Key, i32, S>,
    model: &[(Key, i32)],
) -> Result<(), TestCaseError> {
    sut.assert_invariants();
    prop_assert_eq!(sut.len(), model.len());
    prop_assert_eq!(sut.is_empty(), model.is_empty());
    let keys: Vec<Key> = model.iter().map(|(k, _)| k.clone()).collect();
    let values: Vec<i32> = model.iter().map(|(_, v)| *v).collect();
    prop_assert_eq!(sut.keys(), &keys[..]);
    prop_assert_eq!(sut.values(), &values[..]);
    Ok(())
}

// Property: State-machine equivalence against an ordered Vec model.
// Invariants exercised across random operation sequences:
// - `set` appends new keys and updates existing ones in place.
// - `delete` and `delete_many` remove exactly the model's entries and keep the
//   relative order of survivors.
// - `keep` reorders to the argument order, first occurrence wins.
// - `get`/`position`/`has` agree with the model after every shift.
// - Index invariants hold after every step.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: OrderedMap<Key, i32> = OrderedMap::new();
        let mut model: Vec<(Key, i32)> = Vec::new();
        for op in ops {
            apply(&mut sut, &mut model, &pool, op)?;
            check_parity(&sut, &model)?;
        }
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: Same state-machine invariants as above, under worst-case
// collision behavior (constant hasher). Reindexing must still find each
// shifted entry by position even though every stored hash is identical.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let mut sut: OrderedMap<Key, i32, ConstBuildHasher> =
            OrderedMap::with_hasher(ConstBuildHasher);
        let mut model: Vec<(Key, i32)> = Vec::new();
        for op in ops {
            apply(&mut sut, &mut model, &pool, op)?;
            check_parity(&sut, &model)?;
        }
    }
}
