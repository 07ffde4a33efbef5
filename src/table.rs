//! Operations shared by both map implementations

use crate::{ChainingMap, OpenAddressingMap};

/// The public surface common to [`OpenAddressingMap`] and [`ChainingMap`].
///
/// Lets callers and tests work against either collision strategy.
pub trait HashTable<V> {
    /// Inserts or updates a key-value pair, returning the overwritten value
    fn put(&mut self, key: String, value: V) -> Option<V>;

    /// Retrieves the value for a given key
    fn get(&self, key: &str) -> Option<&V>;

    /// Gets a mutable reference to the value for a given key
    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Returns true if the map holds a live entry for `key`
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry for `key`, returning its value
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Changes the capacity, rehashing every live entry
    fn resize_table(&mut self, new_capacity: usize);

    /// Returns the number of live entries
    fn len(&self) -> usize;

    /// Returns true if the map has no live entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots
    fn capacity(&self) -> usize;

    /// Returns the current load factor
    fn table_load(&self) -> f64 {
        crate::utils::load_factor(self.len(), self.capacity())
    }

    /// Returns the number of slots holding nothing at all
    fn empty_buckets(&self) -> usize;

    /// Returns every live key-value pair in unspecified order
    fn keys_and_values(&self) -> Vec<(&str, &V)>;
}

/// Implements [`HashTable`] by forwarding to the inherent methods of the same names
macro_rules! forward_hash_table {
    ($map:ident) => {
        impl<V, H> HashTable<V> for $map<V, H>
        where
            H: Fn(&str) -> usize,
        {
            fn put(&mut self, key: String, value: V) -> Option<V> {
                $map::put(self, key, value)
            }

            fn get(&self, key: &str) -> Option<&V> {
                $map::get(self, key)
            }

            fn get_mut(&mut self, key: &str) -> Option<&mut V> {
                $map::get_mut(self, key)
            }

            fn contains_key(&self, key: &str) -> bool {
                $map::contains_key(self, key)
            }

            fn remove(&mut self, key: &str) -> Option<V> {
                $map::remove(self, key)
            }

            fn clear(&mut self) {
                $map::clear(self);
            }

            fn resize_table(&mut self, new_capacity: usize) {
                $map::resize_table(self, new_capacity);
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn capacity(&self) -> usize {
                $map::capacity(self)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn keys_and_values(&self) -> Vec<(&str, &V)> {
                $map::keys_and_values(self)
            }
        }
    };
}

forward_hash_table!(OpenAddressingMap);
forward_hash_table!(ChainingMap);
