#![cfg(test)]

// Property tests for HashTable kept inside the crate so they can look at
// the bucket layout through crate-visible fields.

use crate::error::TableError;
use crate::hash_table::HashTable;
use crate::options::TableOptions;
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
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

// Pool-indexed operations so shrinking moves toward earlier keys and
// shorter op lists.
#[derive(Clone, Debug)]
enum Op {
    Put(usize, i32),
    TryPut(Option<usize>, i32),
    Get(usize),
    Delete(usize),
    TryDelete(Option<usize>),
    Contains(String),
    Mutate(usize, i32),
    Keys,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (usize, Vec<String>, Vec<Op>)> {
    let pool = proptest::collection::vec("[a-z]{0,5}", 1..=24);
    (1usize..=12, pool).prop_flat_map(|(cap, pool)| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Put(i, v)),
            1 => (proptest::option::of(idx.clone()), any::<i32>())
                .prop_map(|(i, v)| Op::TryPut(i, v)),
            2 => idx.clone().prop_map(Op::Get),
            2 => idx.clone().prop_map(Op::Delete),
            1 => proptest::option::of(idx.clone()).prop_map(Op::TryDelete),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(Op::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Keys),
            1 => Just(Op::Clear),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (cap, pool.clone(), ops))
    })
}

// Drives `sut` and a `std` model with the same ops and checks after each op:
// - `len`/`is_empty` parity and `get`/`contains` agreement with the model.
// - Capacity only grows, always by doubling from the starting bucket count.
// - The pre-insertion load check leaves at most one entry past 0.75.
// - Every entry sits in the bucket its cached hash selects.
fn run_scenario<S: BuildHasher>(
    mut sut: HashTable<Key, i32, S>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError> {
    let start_cap = sut.capacity();
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        let cap_before = sut.capacity();
        match op {
            Op::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                prop_assert_eq!(sut.get(&k), Some(&v));
            }
            Op::TryPut(i, v) => {
                let len_before = sut.len();
                match i {
                    None => {
                        prop_assert_eq!(sut.try_put(None, v), Err(TableError::absent_key()));
                        prop_assert_eq!(sut.len(), len_before);
                        prop_assert_eq!(sut.capacity(), cap_before);
                    }
                    Some(i) => {
                        let k = key_from(pool, i);
                        let prev = sut.try_put(Some(k.clone()), v);
                        prop_assert_eq!(prev, Ok(model.insert(k, v)));
                    }
                }
            }
            Op::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
                prop_assert_eq!(sut.get(k.0.as_str()), model.get(&k));
            }
            Op::Delete(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.delete(&k), model.remove(&k));
                // second delete is a no-op
                prop_assert_eq!(sut.delete(&k), None);
                prop_assert!(!sut.contains(&k));
            }
            Op::TryDelete(i) => {
                let len_before = sut.len();
                match i {
                    None => {
                        prop_assert_eq!(sut.try_delete(None::<&Key>), Err(TableError::absent_key()));
                        prop_assert_eq!(sut.len(), len_before);
                    }
                    Some(i) => {
                        let k = key_from(pool, i);
                        prop_assert_eq!(sut.try_delete(Some(&k)), Ok(model.remove(&k)));
                    }
                }
            }
            Op::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(s.as_str()), has_model);
                prop_assert_eq!(sut.get(s.as_str()).is_some(), has_model);
                prop_assert_eq!(sut.try_contains(Some(s.as_str())), Ok(has_model));
            }
            Op::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(sv), Some(mv)) => {
                        *sv = sv.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (None, None) => {}
                    (s, m) => {
                        prop_assert!(false, "presence mismatch: {:?} vs {:?}", s, m);
                    }
                }
            }
            Op::Keys => {
                let s_keys: Vec<Key> = sut.keys().cloned().collect();
                prop_assert_eq!(s_keys.len(), model.len(), "each key exactly once");
                let s_set: BTreeSet<Key> = s_keys.into_iter().collect();
                let m_set: BTreeSet<Key> = model.keys().cloned().collect();
                prop_assert_eq!(s_set, m_set);
            }
            Op::Clear => {
                sut.clear();
                model.clear();
                prop_assert_eq!(sut.capacity(), cap_before, "clear keeps capacity");
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());

        let cap = sut.capacity();
        prop_assert!(cap >= cap_before);
        prop_assert!(cap % start_cap == 0 && (cap / start_cap).is_power_of_two());
        prop_assert!((sut.len() as f64) < cap as f64 * 0.75 + 1.0);

        let mut stored = 0;
        for (b, chain) in sut.buckets.iter().enumerate() {
            for e in chain {
                prop_assert_eq!((e.hash % cap as u64) as usize, b);
                stored += 1;
            }
        }
        prop_assert_eq!(stored, sut.len());
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((cap, pool, ops) in arb_scenario()) {
        let sut: HashTable<Key, i32> =
            HashTable::with_options(TableOptions::new().with_initial_capacity(cap));
        run_scenario(sut, &pool, ops)?;
    }
}

// Constant hasher: every key shares one chain.
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

// Same invariants under worst-case collisions, where every lookup is
// resolved by `Eq` alone.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((cap, pool, ops) in arb_scenario()) {
        let sut: HashTable<Key, i32, ConstBuildHasher> = HashTable::with_options_and_hasher(
            TableOptions::new().with_initial_capacity(cap),
            ConstBuildHasher,
        );
        run_scenario(sut, &pool, ops)?;
    }
}

// Property: distinct keys put in any order are all retrievable with the
// last value written, across however many doublings they force.
proptest! {
    #[test]
    fn prop_last_write_wins(
        cap in 1usize..=16,
        writes in proptest::collection::vec((0u16..400, any::<i64>()), 0..600),
    ) {
        let mut t: HashTable<u16, i64> = HashTable::with_capacity(cap);
        let mut last: HashMap<u16, i64> = HashMap::new();
        for (k, v) in writes {
            t.put(k, v);
            last.insert(k, v);
        }
        prop_assert_eq!(t.len(), last.len());
        for (k, v) in &last {
            prop_assert_eq!(t.get(k), Some(v));
        }
    }
}
