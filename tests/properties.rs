//! Property tests run against both backends, using a std `HashMap` as the model.
#![allow(clippy::missing_docs_in_private_items, clippy::arithmetic_side_effects)]

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use strmap::{
    ChainedMap, MapError, OpenAddressingMap, ProbeSequence, StringMap, sum_of_char_codes,
    weighted_char_codes,
};

type HashFn = fn(&str) -> usize;

#[derive(Debug, Clone)]
enum Op {
    Put(String, u32),
    Remove(String),
    Resize(usize),
}

/// Short keys over a tiny alphabet so collisions and repeats are common
fn key() -> impl Strategy<Value = String> {
    "[a-d]{0,3}"
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (key(), any::<u32>()).prop_map(|(key, value)| Op::Put(key, value)),
        2 => key().prop_map(Op::Remove),
        1 => (0_usize..40).prop_map(Op::Resize),
    ]
}

fn pick_hash(weighted: bool) -> HashFn {
    if weighted { weighted_char_codes } else { sum_of_char_codes }
}

fn hash_fn() -> impl Strategy<Value = HashFn> {
    any::<bool>().prop_map(pick_hash)
}

/// Applies `ops` to `map` and to a std `HashMap` model, checking the shared contract after
/// every step. A failed `put` or `resize_table` must leave the contents untouched.
fn check_against_model<M: StringMap<u32>>(map: &mut M, ops: &[Op]) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, u32> = HashMap::new();
    for op in ops {
        match op {
            Op::Put(key, value) => match map.put(key, *value) {
                Ok(()) => {
                    model.insert(key.clone(), *value);
                    prop_assert_eq!(map.get(key), Some(value));
                }
                Err(MapError::ProbeExhausted { key: rejected, .. }) => {
                    prop_assert_eq!(&rejected, key);
                    prop_assert!(!model.contains_key(key));
                    prop_assert!(!map.contains_key(key));
                }
                Err(err) => return Err(TestCaseError::fail(err.to_string())),
            },
            Op::Remove(key) => {
                let before = map.len();
                let removed = map.remove(key);
                prop_assert_eq!(removed, model.remove(key).is_some());
                prop_assert_eq!(map.len(), if removed { before - 1 } else { before });
                prop_assert!(!map.contains_key(key));
            }
            Op::Resize(capacity) => {
                let before = map.capacity();
                if let Err(err) = map.resize_table(*capacity) {
                    prop_assert!(
                        matches!(err, MapError::ProbeExhausted { .. }),
                        "unexpected resize error {:?}",
                        err
                    );
                    prop_assert_eq!(map.capacity(), before);
                }
            }
        }

        prop_assert_eq!(map.len(), model.len());
        prop_assert!(map.empty_buckets() <= map.capacity());
        let keys: HashSet<String> = map.get_keys().into_iter().collect();
        prop_assert_eq!(keys.len(), map.len());
        prop_assert_eq!(&keys, &model.keys().cloned().collect::<HashSet<_>>());
        for (key, value) in &model {
            prop_assert_eq!(map.get(key), Some(value));
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn open_addressing_matches_model(
        hash in hash_fn(),
        capacity in 1_usize..20,
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let mut map = OpenAddressingMap::new(capacity, hash).unwrap();
        check_against_model(&mut map, &ops)?;
        // Every slot is either vacant or holds one of the live entries.
        prop_assert_eq!(map.empty_buckets() + map.len(), map.capacity());
    }

    #[test]
    fn chained_matches_model(
        hash in hash_fn(),
        capacity in 1_usize..20,
        ops in prop::collection::vec(op(), 0..60),
    ) {
        let mut map = ChainedMap::new(capacity, hash).unwrap();
        check_against_model(&mut map, &ops)?;
        let occupied: HashSet<usize> =
            map.get_keys().iter().map(|key| hash(key) % map.capacity()).collect();
        prop_assert_eq!(map.empty_buckets() + occupied.len(), map.capacity());
    }

    #[test]
    fn open_addressing_stays_below_half_load(
        keys in prop::collection::vec("[a-z]{1,6}", 1..200),
        removals in prop::collection::vec("[a-z]{1,6}", 0..20),
        capacity in 1_usize..64,
        new_capacity in 0_usize..64,
    ) {
        let mut map = OpenAddressingMap::with_capacity(capacity).unwrap();
        for key in &keys {
            let outcome = map.put(key, 0_u8);
            prop_assert!(
                map.table_load() < 0.5,
                "load {} after put {:?} with {} of {} slots",
                map.table_load(),
                outcome,
                map.len(),
                map.capacity()
            );
        }
        for key in &removals {
            map.remove(key);
        }
        if map.resize_table(new_capacity).is_ok() {
            prop_assert!(map.table_load() < 0.5);
        }
    }

    #[test]
    fn resize_preserves_contents(
        keys in prop::collection::hash_set("[a-z]{1,5}", 0..40),
        absent in "[0-9]{1,3}",
        new_capacity in 0_usize..120,
    ) {
        let mut open = OpenAddressingMap::new(8, weighted_char_codes).unwrap();
        let mut chained = ChainedMap::new(8, weighted_char_codes).unwrap();
        for (value, key) in keys.iter().enumerate() {
            // Quadratic probing may not find a slot; such keys are simply left out.
            if let Err(err) = open.put(key, value) {
                prop_assert!(
                    matches!(err, MapError::ProbeExhausted { .. }),
                    "unexpected put error {:?}",
                    err
                );
            }
            chained.put(key, value);
        }

        let before_open: Vec<(String, usize)> =
            open.iter().map(|(key, value)| (key.to_owned(), *value)).collect();
        let resized = open.resize_table(new_capacity);
        chained.resize_table(new_capacity);

        prop_assert_eq!(open.len(), before_open.len());
        for (key, value) in &before_open {
            prop_assert_eq!(open.get(key), Some(value));
        }
        for (value, key) in keys.iter().enumerate() {
            prop_assert_eq!(chained.get(key), Some(&value));
        }
        prop_assert!(!open.contains_key(&absent));
        prop_assert!(!chained.contains_key(&absent));
        if new_capacity >= 1 {
            prop_assert_eq!(chained.capacity(), new_capacity);
            if resized.is_ok() && new_capacity >= before_open.len() {
                prop_assert!(open.capacity() >= new_capacity);
            }
        }
    }

    #[test]
    fn probe_sequence_covers_its_period(hash in any::<usize>(), capacity in 1_usize..200) {
        let visited: HashSet<usize> = ProbeSequence::new(hash, capacity).collect();
        let start = hash % capacity;
        // Extending the sequence past one period reaches nothing new.
        let extended: HashSet<usize> =
            (0..3 * capacity).map(|i| (start + (i * i) % capacity) % capacity).collect();
        prop_assert_eq!(visited, extended);
    }
}
