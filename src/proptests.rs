use super::*;

use proptest::prelude::*;
use std::collections::BTreeMap;

fn validate_map<V, S: Sentinel<V>>(m: &SentinelMap<V, S>, model: &BTreeMap<usize, V>)
where
    V: PartialEq + std::fmt::Debug,
{
    for (&key, value) in model {
        assert!(key < m.capacity(), "key {key} must be addressable");
        assert_eq!(m.get(key), Some(value));
    }

    let present = m
        .slots
        .iter()
        .filter(|value| !m.sentinel.is_empty(value))
        .count();
    assert_eq!(
        present,
        model.len(),
        "non-sentinel slot count must match the model"
    );
}

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, u32),
    Get(usize),
}

fn key_strategy() -> impl Strategy<Value = usize> + Clone {
    // Mostly small keys so slots get overwritten, with the occasional far jump
    // to drive the growth path.
    prop_oneof![
        8 => 0usize..64,
        2 => 0usize..4096,
        1 => 0usize..200_000,
    ]
}

fn value_strategy() -> impl Strategy<Value = u32> + Clone {
    0u32..u32::MAX
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    let key = key_strategy();
    let op = prop_oneof![
        60 => (key.clone(), value_strategy()).prop_map(|(k, v)| Op::Insert(k, v)),
        40 => key.clone().prop_map(Op::Get),
    ];
    prop::collection::vec(op, 0..=500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_fixed(ops in ops_strategy()) {
        let mut m = U32Map::fixed();
        let mut model: BTreeMap<usize, u32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    let cap_before = m.capacity();
                    let old_m = m.insert(key, value);
                    let old_model = model.insert(key, value);
                    prop_assert_eq!(old_m, old_model);
                    prop_assert!(m.capacity() >= cap_before, "capacity must never shrink");
                    prop_assert!(m.capacity() > key);
                }
                Op::Get(key) => {
                    prop_assert_eq!(m.get(key), model.get(&key));
                }
            }
        }

        validate_map(&m, &model);
    }

    #[test]
    fn prop_fixed_matches_stored(ops in ops_strategy()) {
        let mut fixed = U32Map::fixed();
        let mut stored = SentinelMap::new(u32::MAX);

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(fixed.insert(key, value), stored.insert(key, value));
                }
                Op::Get(key) => {
                    prop_assert_eq!(fixed.get(key), stored.get(key));
                }
            }
            prop_assert_eq!(fixed.capacity(), stored.capacity());
        }

        prop_assert_eq!(fixed.slots, stored.slots);
    }

    #[test]
    fn prop_growth_fills_with_sentinel(start in 0usize..512, key in 0usize..100_000) {
        let mut m = U32Map::fixed_with_capacity(start);
        let result = m.insert(key, 7);

        prop_assert_eq!(result, None);
        prop_assert!(m.capacity() > key);
        prop_assert!(m.capacity() >= start);
        for (k, &slot) in m.slots.iter().enumerate() {
            if k == key {
                prop_assert_eq!(slot, 7);
            } else {
                prop_assert_eq!(slot, u32::MAX, "slot {} should be empty", k);
            }
        }
    }

    #[test]
    fn prop_overwrite_returns_previous(key in key_strategy(), v1 in value_strategy(), v2 in value_strategy()) {
        let mut m = SentinelMap::new(u32::MAX);
        prop_assert_eq!(m.insert(key, v1), None);
        prop_assert_eq!(m.insert(key, v2), Some(v1));
        prop_assert_eq!(m.get(key), Some(&v2));
    }
}

#[test]
fn test_randomized_insert_get() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(2);
    let mut m = SentinelMap::new(0u64);
    let mut model: BTreeMap<usize, u64> = BTreeMap::new();

    for _ in 0..50_000 {
        let op = rng.gen_range(0..100);
        let key = rng.gen_range(0..20_000);

        match op {
            0..=59 => {
                let v: u64 = rng.gen_range(1..=u64::MAX);
                assert_eq!(m.insert(key, v), model.insert(key, v));
            }
            _ => {
                assert_eq!(m.get(key), model.get(&key));
            }
        }
    }

    validate_map(&m, &model);
}

#[test]
fn test_monotonic_keys_amortized_growth() {
    let mut m = U32Map::fixed();
    let mut reallocations = 0;
    let mut last_cap = m.capacity();

    for key in 0..1_000_000usize {
        m.insert(key, key as u32);
        if m.capacity() != last_cap {
            reallocations += 1;
            last_cap = m.capacity();
        }
    }

    // Each growth at least quadruples the length.
    assert!(reallocations <= 11, "grew {reallocations} times");
    assert_eq!(m.get(999_999), Some(&999_999));
}
