use std::collections::HashMap;

use classic_algos::hashmap::{ChainedHashMap, JenkinsMix32, KeyHasher, Mix64, OneAtATime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Keeps only the lowest bits, so small tables collide constantly.
#[derive(Debug, Default, Clone, Copy)]
struct Weak;

impl KeyHasher<u32> for Weak {
    fn hash_key(&self, key: &u32) -> u32 {
        key & 0b11
    }
}

fn check_against_std<H>(seed: u64, capacity: usize)
where
    H: KeyHasher<u32> + Default,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let mut map: ChainedHashMap<u32, u32, H> = ChainedHashMap::with_capacity(capacity);
    let mut model: HashMap<u32, u32> = HashMap::new();

    for step in 0..5_000u32 {
        let key = rng.gen_range(0..300);
        match rng.gen_range(0..4) {
            0 | 1 => {
                let inserted = map.insert(key, step);
                assert_eq!(inserted, !model.contains_key(&key));
                model.entry(key).or_insert(step);
            }
            2 => assert_eq!(map.remove(&key), model.remove(&key)),
            _ => assert_eq!(map.find(&key), model.get(&key)),
        }
        assert_eq!(map.len(), model.len());
    }

    for (key, value) in &model {
        assert_eq!(map.find(key), Some(value));
    }
    assert_eq!(map.iter().count(), model.len());
}

#[test]
fn test_random_ops_match_std_hashmap() {
    check_against_std::<JenkinsMix32>(0, 1024);
}

#[test]
fn test_random_ops_with_rehashing() {
    check_against_std::<JenkinsMix32>(1, 1);
}

#[test]
fn test_random_ops_with_pathological_hash() {
    check_against_std::<Weak>(2, 2);
}

#[test]
fn test_many_rehashes_keep_values() {
    let mut map: ChainedHashMap<u64, u64, Mix64> = ChainedHashMap::with_capacity(1);
    for k in 0..10_000u64 {
        assert!(map.insert(k * 7919, k));
    }
    assert_eq!(map.capacity(), 16_384);
    for k in 0..10_000u64 {
        assert_eq!(map.find(&(k * 7919)), Some(&k));
    }
}

#[test]
fn test_string_keys_with_explicit_hasher() {
    let mut map: ChainedHashMap<String, usize, OneAtATime> = ChainedHashMap::with_hasher(OneAtATime);
    let words = ["alpha", "beta", "gamma", "delta", "alpha"];
    for (i, word) in words.iter().enumerate() {
        map.insert(word.to_string(), i);
    }
    assert_eq!(map.len(), 4);
    assert_eq!(map.find(&"alpha".to_string()), Some(&0));
    assert_eq!(map.find(&"epsilon".to_string()), None);
}

#[test]
fn test_default_read_creates_entry() {
    let mut map: ChainedHashMap<String, i32> = ChainedHashMap::default();
    assert_eq!(map.find(&"missing".to_string()), None);
    assert_eq!(map.len(), 0);
    assert_eq!(*map.get_or_insert_default("missing".to_string()), 0);
    assert_eq!(map.len(), 1);
}
