use std::{fmt, mem, slice};

use log::debug;

use crate::{
    chain::{self, Chain, Node},
    hash_functions::{HashFn, char_sum},
    utils::{at_load_limit, fit_capacity, load_factor, next_prime},
};

/// Capacity used by [`ChainingMap::default`]
pub const DEFAULT_CAPACITY: usize = 11;

/// Slots per entry the table keeps available, i.e. a load factor limit of 1.0
const SLOTS_PER_ENTRY: usize = 1;

/// A hash map resolving collisions by separate chaining.
///
/// Every slot owns a singly-linked [`Chain`] of the entries whose key hashes to it, so
/// collisions stay local to one slot. Capacity is always prime and the load factor
/// stays at or below 1.0 after every [`put`](Self::put).
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ChainingMap<V, H = HashFn> {
    /// One chain per slot; its length is the capacity
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Maps a key to its slot before reduction modulo capacity
    hash_function: H,
}

impl<V> Default for ChainingMap<V> {
    /// Creates an empty map with 11 slots hashing keys with [`char_sum`]
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, char_sum)
    }
}

impl<V: fmt::Debug, H> fmt::Debug for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainingMap")
            .field("buckets", &self.buckets)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<V, H> Extend<(String, V)> for ChainingMap<V, H>
where
    H: Fn(&str) -> usize,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

/// Allocates `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Chain::new);
    buckets
}

impl<V, H> ChainingMap<V, H>
where
    H: Fn(&str) -> usize,
{
    /// Creates an empty map with at least `capacity` slots, promoted to the next odd prime
    pub fn new(capacity: usize, hash_function: H) -> Self {
        Self { buckets: empty_chains(next_prime(capacity)), size: 0, hash_function }
    }

    /// Gets the slot index of a key in a table of `capacity` slots
    #[allow(clippy::arithmetic_side_effects)]
    fn index_in(&self, key: &str, capacity: usize) -> usize {
        (self.hash_function)(key) % capacity
    }

    /// Gets the chain a key belongs to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.index_in(key, self.buckets.len()))
    }

    /// Gets the chain a key belongs to, mutably
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.index_in(key, self.buckets.len());
        self.buckets.get_mut(index)
    }

    /// Inserts a key-value pair, or overwrites the value of the existing entry in place.
    ///
    /// Returns the previous value when the key was already present. The table doubles
    /// first if the load factor has reached 1.0.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if at_load_limit(self.size, self.capacity(), SLOTS_PER_ENTRY) {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        let chain = self.chain_mut(&key)?;
        if let Some(existing) = chain.find_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        chain.push_back(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key).map(Node::value)
    }

    /// Gets a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.find_mut(key)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.chain(key).is_some_and(|chain| chain.find(key).is_some())
    }

    /// Unlinks the entry for `key` and returns its value; a missing key is a no-op
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.chain_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(value)
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_chains(self.capacity());
        self.size = 0;
    }

    /// Changes the capacity and rehashes every entry.
    ///
    /// Declines silently if `new_capacity` is zero. Otherwise the capacity is adjusted
    /// upward until it is prime and keeps the load factor at or below 1.0. Within each
    /// new chain, entries keep the order in which the old slots were scanned.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let capacity = fit_capacity(new_capacity, self.size, SLOTS_PER_ENTRY);
        debug!(
            "resizing chaining table from {} to {} slots ({} entries)",
            self.capacity(),
            capacity,
            self.size
        );

        let old_buckets = mem::replace(&mut self.buckets, empty_chains(capacity));
        for (key, value) in old_buckets.into_iter().flatten() {
            let index = self.index_in(&key, capacity);
            if let Some(chain) = self.buckets.get_mut(index) {
                chain.push_back(key, value);
            }
        }
    }

    /// Returns the number of entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map has no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor, `len / capacity`
    #[must_use]
    pub fn table_load(&self) -> f64 {
        load_factor(self.size, self.capacity())
    }

    /// Returns the number of slots whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Returns every key-value pair, slot by slot and in chain order within a slot
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().map(|node| (node.key(), node.value())).collect()
    }

    /// Returns an iterator over the entries, slot by slot
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), current: None }
    }
}

impl<'a, V, H> IntoIterator for &'a ChainingMap<V, H>
where
    H: Fn(&str) -> usize,
{
    type Item = &'a Node<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ChainingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Slots not yet visited
    buckets: slice::Iter<'a, Chain<V>>,
    /// Chain of the slot being visited
    current: Option<chain::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Node<V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.current.as_mut().and_then(Iterator::next) {
                return Some(node);
            }
            self.current = Some(self.buckets.next()?.iter());
        }
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::hash_functions::{positional_char_sum, std_hash};

    fn init_test_logger() {
        let _ = env_logger::builder().filter_level(log::LevelFilter::Trace).is_test(true).try_init();
    }

    /// Sends every key to slot 0 so all keys share one chain
    fn constant_hash(_key: &str) -> usize {
        0
    }

    #[test]
    fn test_default() {
        let map = ChainingMap::<i32>::default();
        assert_eq!(map.capacity(), 11);
        assert_eq!(map.len(), 0);
        assert_eq!(map.empty_buckets(), 11);
    }

    #[test]
    fn test_scenario_put_keys_and_remove() {
        let mut map = ChainingMap::new(11, char_sum);
        for i in 1..=5 {
            map.put(i.to_string(), (i * 10).to_string());
        }
        assert_eq!(map.len(), 5);

        let pairs: HashSet<(String, String)> = map
            .keys_and_values()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        let expected: HashSet<(String, String)> =
            (1..=5).map(|i| (i.to_string(), (i * 10).to_string())).collect();
        assert_eq!(pairs, expected);

        assert_eq!(map.remove("1"), Some("10".to_string()));
        assert_eq!(map.len(), 4);
        assert!(!map.contains_key("1"));
    }

    #[test]
    fn test_put_overwrites_in_place() {
        let mut map = ChainingMap::new(11, constant_hash);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        assert_eq!(map.put("a".to_string(), 10), Some(1));

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&10));
        // The overwritten node keeps its position at the front of the chain
        assert_eq!(map.keys_and_values(), vec![("a", &10), ("b", &2)]);
    }

    #[test]
    fn test_collisions_share_a_chain() {
        let mut map = ChainingMap::new(7, constant_hash);
        for (key, value) in [("x", 1), ("y", 2), ("z", 3)] {
            map.put(key.to_string(), value);
        }
        assert_eq!(map.empty_buckets(), 6);
        assert_eq!(map.get("y"), Some(&2));

        assert_eq!(map.remove("y"), Some(2));
        assert_eq!(map.get("x"), Some(&1));
        assert_eq!(map.get("z"), Some(&3));
        assert_eq!(map.remove("y"), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_put_doubles_at_full_load() {
        init_test_logger();
        let mut map = ChainingMap::new(3, std_hash);
        for key in ["a", "b", "c"] {
            map.put(key.to_string(), 0);
        }
        assert_eq!(map.capacity(), 3);
        assert!((map.table_load() - 1.0).abs() < f64::EPSILON);

        map.put("d".to_string(), 0);
        assert_eq!(map.capacity(), 7);
        assert_eq!(map.len(), 4);
        for key in ["a", "b", "c", "d"] {
            assert!(map.contains_key(key));
        }
    }

    #[test]
    fn test_load_stays_at_or_below_one() {
        let mut map = ChainingMap::new(53, char_sum);
        for i in 0..150 {
            map.put(format!("str{i}"), i * 100);
            assert!(map.table_load() <= 1.0);
            assert!(crate::utils::is_prime(map.capacity()));
        }
        for i in 0..150 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_repeated_keys_keep_size() {
        let mut map = ChainingMap::new(41, positional_char_sum);
        for i in 0..50 {
            map.put(format!("str{}", i / 3), i * 100);
        }
        assert_eq!(map.len(), 17);
        assert_eq!(map.get("str16"), Some(&4900));
    }

    #[test]
    fn test_resize_table() {
        init_test_logger();
        let mut map = ChainingMap::new(23, std_hash);
        for i in 0..20 {
            map.put(format!("key{i}"), i);
        }

        map.resize_table(30);
        assert_eq!(map.capacity(), 31);

        // 20 entries do not fit in 4 -> 5 slots; doubling gives 10 -> 11 -> 22 -> 23
        map.resize_table(4);
        assert_eq!(map.capacity(), 23);

        assert_eq!(map.len(), 20);
        for i in 0..20 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_resize_table_declines_zero() {
        let mut map = ChainingMap::new(11, char_sum);
        map.put("a".to_string(), 1);
        map.resize_table(0);
        assert_eq!(map.capacity(), 11);
        map.resize_table(1);
        assert_eq!(map.capacity(), 3);
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = ChainingMap::new(101, char_sum);
        map.put("key1".to_string(), 10);
        map.put("key2".to_string(), 20);

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
        assert!(!map.contains_key("key1"));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainingMap::default();
        map.put("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert!(map.get_mut("key2").is_none());
    }

    #[test]
    fn test_iter_visits_every_entry() {
        let mut map = ChainingMap::new(5, char_sum);
        map.extend((0..4).map(|i| (format!("k{i}"), i)));

        let sum: i32 = map.iter().map(|node| *node.value()).sum();
        assert_eq!(sum, 6);
        assert_eq!(map.iter().count(), map.len());
    }

    #[test]
    fn test_display() {
        let mut map = ChainingMap::new(3, constant_hash);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        assert_eq!(map.to_string(), "0: SLL [(a: 1) -> (b: 2)]\n1: SLL []\n2: SLL []\n");
    }
}
