//! Separate-chaining hash map with a pluggable [`KeyHasher`].
//!
//! The table starts at a fixed number of buckets and doubles whenever the
//! entry count reaches it, reinserting every entry. `insert` never overwrites:
//! the first value stored for a key wins until that key is removed.

pub mod hashers;

use std::fmt;
use std::iter::{Flatten, FusedIterator};
use std::mem;
use std::slice;

use tracing::debug;

pub use hashers::{ClassHash, JenkinsMix32, KeyHasher, KnuthMultiplicative, Mix64, OneAtATime};

/// Bucket count used by [`ChainedHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
struct Entry<K, V> {
    key: K,
    value: V,
}

type Bucket<K, V> = Vec<Entry<K, V>>;

/// A key-value map resolving collisions by chaining entries per bucket.
#[derive(Clone)]
pub struct ChainedHashMap<K, V, H = ClassHash> {
    table: Vec<Bucket<K, V>>,
    len: usize,
    hasher: H,
}

impl<K, V, H> ChainedHashMap<K, V, H>
where
    K: Eq,
    H: KeyHasher<K> + Default,
{
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, H::default())
    }

    /// Creates an empty map with `n` buckets (at least one).
    #[inline]
    pub fn with_capacity(n: usize) -> Self {
        Self::with_capacity_and_hasher(n, H::default())
    }
}

impl<K, V, H> ChainedHashMap<K, V, H>
where
    K: Eq,
    H: KeyHasher<K>,
{
    #[inline]
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hasher)
    }

    pub fn with_capacity_and_hasher(n: usize, hasher: H) -> Self {
        let mut table = Vec::with_capacity(n.max(1));
        table.resize_with(n.max(1), Vec::new);
        Self { table, len: 0, hasher }
    }

    #[inline]
    fn bucket_index(&self, key: &K) -> usize {
        self.hasher.hash_key(key) as usize % self.table.len()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Inserts `key` unless it is already present, in which case the stored
    /// value is kept and `value` is dropped. Returns whether it was inserted.
    ///
    /// ```
    /// use classic_algos::hashmap::{ChainedHashMap, KnuthMultiplicative};
    ///
    /// let mut map: ChainedHashMap<i32, &str, KnuthMultiplicative> = ChainedHashMap::new();
    /// assert!(map.insert(1, "a"));
    /// assert!(!map.insert(1, "b"));
    /// assert_eq!(map.find(&1), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.find(&key).is_some() {
            return false;
        }
        if self.len >= self.table.len() {
            self.rehash();
        }
        let idx = self.bucket_index(&key);
        self.table[idx].push(Entry { key, value });
        self.len += 1;
        true
    }

    /// Removes `key`, returning its value. Absent keys are ignored.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.bucket_index(key);
        let bucket = &mut self.table[idx];
        let pos = bucket.iter().position(|entry| &entry.key == key)?;
        // keep chain order so iteration stays stable
        let entry = bucket.remove(pos);
        self.len -= 1;
        Some(entry.value)
    }

    /// Looks `key` up without touching the table.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.table[self.bucket_index(key)]
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.bucket_index(key);
        self.table[idx]
            .iter_mut()
            .find(|entry| &entry.key == key)
            .map(|entry| &mut entry.value)
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    ///
    /// ```
    /// use classic_algos::hashmap::ChainedHashMap;
    ///
    /// let mut map: ChainedHashMap<String, i32> = ChainedHashMap::new();
    /// *map.get_or_insert_default("foo".to_string()) += 1;
    /// assert_eq!(map.get_or_insert_default("baz".to_string()), &mut 0);
    /// assert_eq!(map.len(), 2);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let mut idx = self.bucket_index(&key);
        let found = self.table[idx].iter().position(|entry| entry.key == key);
        let pos = match found {
            Some(pos) => pos,
            None => {
                if self.len >= self.table.len() {
                    self.rehash();
                    idx = self.bucket_index(&key);
                }
                self.table[idx].push(Entry { key, value: V::default() });
                self.len += 1;
                self.table[idx].len() - 1
            }
        };
        &mut self.table[idx][pos].value
    }

    /// Iterates entries bucket by bucket, in chain order within a bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.table.iter().flatten(),
            remaining: self.len,
        }
    }

    /// Doubles the bucket count and reinserts every entry in table order.
    fn rehash(&mut self) {
        let new_size = self.table.len() * 2;
        debug!(from = self.table.len(), to = new_size, entries = self.len, "rehash");

        let mut fresh = Vec::with_capacity(new_size);
        fresh.resize_with(new_size, Vec::new);
        let old = mem::replace(&mut self.table, fresh);
        for entry in old.into_iter().flatten() {
            let idx = self.bucket_index(&entry.key);
            self.table[idx].push(entry);
        }
    }
}

impl<K, V, H> Default for ChainedHashMap<K, V, H>
where
    K: Eq,
    H: KeyHasher<K> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> FromIterator<(K, V)> for ChainedHashMap<K, V, H>
where
    K: Eq,
    H: KeyHasher<K> + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, H> Extend<(K, V)> for ChainedHashMap<K, V, H>
where
    K: Eq,
    H: KeyHasher<K>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        iter.into_iter().for_each(|(k, v)| _ = self.insert(k, v));
    }
}

impl<K, V, H> fmt::Debug for ChainedHashMap<K, V, H>
where
    K: fmt::Debug + Eq,
    V: fmt::Debug,
    H: KeyHasher<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`ChainedHashMap`].
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    entries: Flatten<slice::Iter<'a, Bucket<K, V>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sends every key to bucket 0.
    #[derive(Debug, Default, Clone, Copy)]
    struct Constant;

    impl KeyHasher<u32> for Constant {
        fn hash_key(&self, _key: &u32) -> u32 {
            0
        }
    }

    #[test]
    fn test_walkthrough() {
        let mut map: ChainedHashMap<String, i32> = ChainedHashMap::new();
        *map.get_or_insert_default("foo".to_string()) = 1;
        map.insert("bar".to_string(), 2);
        assert_eq!(map.find(&"foo".to_string()), Some(&1));
        assert_eq!(map.find(&"bar".to_string()), Some(&2));

        assert_eq!(*map.get_or_insert_default("baz".to_string()), 0);
        assert_eq!(*map.get_or_insert_default("qux".to_string()), 0);
        assert_eq!(map.len(), 4);

        assert_eq!(map.remove(&"foo".to_string()), Some(1));
        assert_eq!(map.len(), 3);
        assert_eq!(*map.get_or_insert_default("foo".to_string()), 0);
        assert_eq!(*map.get_or_insert_default("bar".to_string()), 2);
    }

    #[test]
    fn test_first_write_wins() {
        let mut map: ChainedHashMap<i32, &str, KnuthMultiplicative> = ChainedHashMap::new();
        assert!(map.insert(5, "first"));
        assert!(!map.insert(5, "second"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.find(&5), Some(&"first"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut map: ChainedHashMap<u32, u32, JenkinsMix32> = ChainedHashMap::with_capacity(4);
        map.insert(1, 10);
        assert_eq!(map.remove(&2), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.find(&1), Some(&10));
    }

    #[test]
    fn test_find_does_not_insert() {
        let map: ChainedHashMap<u64, u64, Mix64> = ChainedHashMap::new();
        assert_eq!(map.find(&3), None);
        assert!(map.is_empty());
    }

    #[test]
    fn test_rehash_doubles_and_keeps_entries() {
        let mut map: ChainedHashMap<u32, u32, JenkinsMix32> = ChainedHashMap::with_capacity(2);
        assert_eq!(map.capacity(), 2);
        for k in 0..9 {
            map.insert(k, k * 100);
        }
        // rehashed at len 2, 4 and 8
        assert_eq!(map.capacity(), 16);
        assert_eq!(map.len(), 9);
        for k in 0..9 {
            assert_eq!(map.find(&k), Some(&(k * 100)));
        }
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut map: ChainedHashMap<i32, i32, KnuthMultiplicative> = ChainedHashMap::with_capacity(0);
        assert_eq!(map.capacity(), 1);
        map.insert(1, 1);
        map.insert(2, 2);
        assert_eq!(map.capacity(), 2);
    }

    #[test]
    fn test_all_keys_colliding() {
        let mut map: ChainedHashMap<u32, u32, Constant> = ChainedHashMap::with_capacity(8);
        for k in 0..6 {
            map.insert(k, k);
        }
        assert_eq!(map.table[0].len(), 6);
        map.remove(&2);
        let keys: Vec<u32> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn test_rehash_preserves_chain_order() {
        let mut map: ChainedHashMap<u32, u32, Constant> = ChainedHashMap::with_capacity(2);
        for k in 0..5 {
            map.insert(k, k);
        }
        let keys: Vec<u32> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_find_mut() {
        let mut map: ChainedHashMap<i32, String, KnuthMultiplicative> = ChainedHashMap::new();
        map.insert(1, String::from("hello"));
        if let Some(s) = map.find_mut(&1) {
            s.push_str("_world");
        }
        assert_eq!(map.find(&1).map(String::as_str), Some("hello_world"));
    }

    #[test]
    fn test_get_or_insert_default_at_capacity() {
        let mut map: ChainedHashMap<u32, u32, JenkinsMix32> = ChainedHashMap::with_capacity(1);
        map.insert(1, 1);
        *map.get_or_insert_default(2) += 5;
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.find(&2), Some(&5));
    }

    #[test]
    fn test_from_iter_and_debug() {
        let map: ChainedHashMap<i32, i32, KnuthMultiplicative> = vec![(1, 10), (1, 11), (2, 20)].into_iter().collect();
        assert_eq!(map.len(), 2);
        assert_eq!(map.find(&1), Some(&10));
        let s = format!("{:?}", map);
        assert!(s.contains("1: 10"));
        assert!(s.contains("2: 20"));
    }

    #[test]
    fn test_iter_exact_size() {
        let map: ChainedHashMap<u32, u32, JenkinsMix32> = (0..20).map(|k| (k, k)).collect();
        let mut it = map.iter();
        assert_eq!(it.len(), 20);
        it.next();
        assert_eq!(it.len(), 19);
        assert_eq!(it.count(), 19);
    }
}
