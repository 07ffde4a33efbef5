use std::{fmt, mem};

use log::{debug, error, trace};

use crate::{
    hash_functions::HashFn,
    utils::{at_load_limit, fit_capacity, load_factor, next_prime},
};

/// Slots per live entry the table keeps available, i.e. a load factor limit of 0.5
const SLOTS_PER_ENTRY: usize = 2;

/// A live key-value pair stored in a slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

impl<V> Entry<V> {
    /// Returns the entry's key
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the entry's value
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Always false: removed entries become [`Slot::Tombstone`] and are never handed out
    /// as an `Entry`
    #[must_use]
    #[allow(clippy::unused_self)]
    pub const fn is_tombstone(&self) -> bool {
        false
    }
}

/// State of one slot in the backing array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<V> {
    /// Never written since the last rebuild; terminates probe sequences
    Empty,
    /// Holds a live entry
    Occupied(Entry<V>),
    /// Held the given key until it was removed; probe sequences continue through it.
    ///
    /// The value went back to the caller of `remove`, so only the key is kept.
    Tombstone(String),
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V> Slot<V> {
    /// Returns true if the slot has never held an entry
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns true if the slot marks a removed entry
    #[must_use]
    pub const fn is_tombstone(&self) -> bool {
        matches!(self, Self::Tombstone(_))
    }

    /// Returns the live entry held by the slot
    #[must_use]
    pub const fn entry(&self) -> Option<&Entry<V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Tombstone(_) => None,
        }
    }

    /// Returns true if the slot holds a live entry for `key`
    fn holds(&self, key: &str) -> bool {
        self.entry().is_some_and(|entry| entry.key == key)
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("None"),
            Self::Occupied(entry) => write!(f, "K: {} V: {} TS: False", entry.key, entry.value),
            Self::Tombstone(key) => write!(f, "K: {key} TS: True"),
        }
    }
}

/// Quadratic probe sequence `home + i²` (mod capacity) for `i` in `0..capacity`
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Index the next call yields
    index: usize,
    /// Distance from the current index to the following one, `2i + 1`
    step: usize,
    /// Indices left before the sequence gives up
    remaining: usize,
    /// Length of the backing array being probed
    capacity: usize,
}

impl QuadraticProbe {
    /// Starts a probe sequence at `home` in a table of `capacity` slots
    const fn new(home: usize, capacity: usize) -> Self {
        Self { index: home, step: 1, remaining: capacity, capacity }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        // (i + 1)² - i² = 2i + 1, so each index is the previous one plus the next odd number
        let current = self.index;
        self.index = (self.index + self.step) % self.capacity;
        self.step = (self.step + 2) % self.capacity;
        Some(current)
    }
}

/// A hash map resolving collisions by open addressing with quadratic probing.
///
/// Capacity is always prime and the load factor stays below 0.5 after every
/// [`put`](Self::put), which guarantees the probe sequence reaches a free slot.
/// Removal leaves a tombstone in place so probe sequences through the slot stay intact;
/// tombstones are dropped on the next rebuild.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = HashFn> {
    /// The slots of the table; its length is the capacity
    buckets: Vec<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Maps a key to its home index before reduction modulo capacity
    hash_function: H,
}

impl<V: fmt::Debug, H> fmt::Debug for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("buckets", &self.buckets)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

impl<V, H> Extend<(String, V)> for OpenAddressingMap<V, H>
where
    H: Fn(&str) -> usize,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

/// Allocates `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Slot::default);
    buckets
}

impl<V, H> OpenAddressingMap<V, H>
where
    H: Fn(&str) -> usize,
{
    /// Creates an empty map with at least `capacity` slots.
    ///
    /// The capacity is promoted to the next odd prime, so `new(20, f)` has 23 slots.
    pub fn new(capacity: usize, hash_function: H) -> Self {
        Self { buckets: empty_slots(next_prime(capacity)), size: 0, hash_function }
    }

    /// Gets the home index of a key
    #[allow(clippy::arithmetic_side_effects)]
    fn home_index(&self, key: &str) -> usize {
        (self.hash_function)(key) % self.buckets.len()
    }

    /// Follows the probe sequence of `key` and returns the first index whose slot
    /// satisfies `stop`
    fn probe(&self, key: &str, stop: impl Fn(&Slot<V>) -> bool) -> Option<usize> {
        QuadraticProbe::new(self.home_index(key), self.buckets.len())
            .find(|&index| self.buckets.get(index).is_some_and(&stop))
    }

    /// Finds the live slot holding `key`.
    ///
    /// Tombstones don't end the search, an empty slot does.
    fn find(&self, key: &str) -> Option<usize> {
        let index = self.probe(key, |slot| slot.is_empty() || slot.holds(key))?;
        self.buckets.get(index).is_some_and(|slot| slot.holds(key)).then_some(index)
    }

    /// Inserts a key-value pair, or replaces the value of a live entry with the same key.
    ///
    /// Returns the previous value when an existing entry was overwritten. The table
    /// grows first if the insertion would bring the load factor to 0.5. The check
    /// counts the entry being inserted rather than only the current load, so a put
    /// never leaves the table at or above half load (2 entries in 3 slots, say).
    ///
    /// Probing stops at the first empty slot, tombstone, or live entry holding `key`,
    /// whichever comes first. A reused tombstone is filled with the new entry even if
    /// a live entry for `key` sits further along the sequence.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if at_load_limit(self.size.saturating_add(1), self.capacity(), SLOTS_PER_ENTRY) {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        // Stops at an empty slot, a tombstone, or the live entry for `key`
        let reusable = |slot: &Slot<V>| slot.entry().is_none_or(|entry| entry.key == key);
        let Some(index) = self.probe(&key, reusable) else {
            // Below half load the first (capacity + 1) / 2 probes are distinct and fewer
            // slots than that hold other keys
            error!("no free slot for {key:?} in {} slots", self.capacity());
            return None;
        };

        let slot = self.buckets.get_mut(index)?;
        match slot {
            Slot::Occupied(entry) => Some(mem::replace(&mut entry.value, value)),
            Slot::Empty | Slot::Tombstone(_) => {
                if slot.is_tombstone() {
                    trace!("reusing tombstone at slot {index} for {key:?}");
                }
                *slot = Slot::Occupied(Entry { key, value });
                self.size = self.size.saturating_add(1);
                None
            }
        }
    }

    /// Retrieves the value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find(key)?;
        self.buckets.get(index)?.entry().map(Entry::value)
    }

    /// Gets a mutable reference to the value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        match self.buckets.get_mut(index)? {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone(_) => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry for `key`, leaving a tombstone in its slot.
    ///
    /// Returns the removed value; a missing key is a no-op.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find(key)?;
        let slot = self.buckets.get_mut(index)?;
        let Slot::Occupied(entry) = mem::replace(slot, Slot::Tombstone(key.to_string())) else {
            return None;
        };
        self.size = self.size.saturating_sub(1);
        Some(entry.value)
    }

    /// Removes every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_slots(self.capacity());
        self.size = 0;
    }

    /// Changes the capacity and rehashes every live entry.
    ///
    /// Declines silently if `new_capacity` is not larger than the number of entries.
    /// Otherwise the capacity is adjusted upward until it is prime and keeps the load
    /// factor at or below 0.5. Tombstones are not carried over.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity <= self.size {
            return;
        }

        let capacity = fit_capacity(new_capacity, self.size, SLOTS_PER_ENTRY);
        debug!(
            "resizing open addressing table from {} to {} slots ({} entries)",
            self.capacity(),
            capacity,
            self.size
        );
        let purged = self.rehash(capacity);
        if purged > 0 {
            debug!("dropped {purged} tombstones while rehashing");
        }
    }

    /// Moves every live entry into a fresh table of `capacity` slots, returning the
    /// number of tombstones left behind
    fn rehash(&mut self, capacity: usize) -> usize {
        let old_buckets = mem::replace(&mut self.buckets, empty_slots(capacity));
        let mut purged: usize = 0;

        for slot in old_buckets {
            let entry = match slot {
                Slot::Occupied(entry) => entry,
                Slot::Tombstone(_) => {
                    purged = purged.saturating_add(1);
                    continue;
                }
                Slot::Empty => continue,
            };
            let target = self
                .probe(&entry.key, Slot::is_empty)
                .and_then(|index| self.buckets.get_mut(index));
            debug_assert!(target.is_some(), "rehash into {capacity} slots lost {:?}", entry.key);
            match target {
                Some(target) => *target = Slot::Occupied(entry),
                None => {
                    // Unreachable while the load stays at or below 0.5
                    error!("no free slot for {:?} in {capacity} slots", entry.key);
                    self.size = self.size.saturating_sub(1);
                }
            }
        }

        purged
    }

    /// Returns the number of live entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map has no live entries
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

    /// Returns the number of slots that have never held an entry since the last rebuild.
    ///
    /// Tombstones are not counted as empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_empty()).count()
    }

    /// Returns every live key-value pair in slot order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().map(|entry| (entry.key(), entry.value())).collect()
    }

    /// Returns the slots of the table, including empty ones and tombstones
    #[must_use]
    pub fn slots(&self) -> &[Slot<V>] {
        &self.buckets
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.buckets.iter() }
    }
}

impl<V: fmt::Display, H> fmt::Display for OpenAddressingMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

impl<'a, V, H> IntoIterator for &'a OpenAddressingMap<V, H>
where
    H: Fn(&str) -> usize,
{
    type Item = &'a Entry<V>;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots of the table
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.find_map(Slot::entry)
    }
}
