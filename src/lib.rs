//! # Prime Hash
//!
//! Hash maps built from scratch over prime-sized tables, with two collision
//! resolution strategies:
//!
//! - `OpenAddressingMap`: quadratic probing with tombstone deletion, kept below a
//!   load factor of 0.5
//! - `ChainingMap`: separate chaining with a singly-linked list per slot, kept at or
//!   below a load factor of 1.0
//!
//! Both take the hash function as a value at construction. Any `Fn(&str) -> usize`
//! works; `hash_functions` ships a few. Capacity is always prime: requested
//! capacities are promoted to the next odd prime, and resizes alternate between
//! promoting to a prime and doubling until the entries fit.
//!
//! ## Open Addressing
//!
//! ```rust
//! use primehash::{OpenAddressingMap, hash_functions::char_sum};
//!
//! // 20 is promoted to the next prime
//! let mut map = OpenAddressingMap::new(20, char_sum);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values, leaving a tombstone behind
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//!
//! // Grow the table; entries are rehashed into the new slots
//! map.resize_table(30);
//! assert_eq!(map.capacity(), 31);
//! assert_eq!(map.get("banana"), Some(&2));
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use primehash::{ChainingMap, HashTable};
//!
//! fn fill(map: &mut impl HashTable<String>) {
//!     for i in 1..=5 {
//!         map.put(i.to_string(), (i * 10).to_string());
//!     }
//! }
//!
//! // 11 slots hashing with `char_sum`
//! let mut map = ChainingMap::default();
//! fill(&mut map);
//! assert_eq!(map.len(), 5);
//!
//! map.remove("1");
//! assert_eq!(map.len(), 4);
//! assert!(!map.contains_key("1"));
//! assert!(map.table_load() <= 1.0);
//! ```

/// Module implementing the singly-linked list used as a chaining bucket
pub mod chain;
/// Module implementing the separate chaining hash map
pub mod chaining;
/// Hash functions that can be injected into either map
pub mod hash_functions;
/// Module implementing mode finding on top of the chaining map
mod mode;
/// Module implementing the open addressing hash map with quadratic probing
pub mod open_addressing;
/// Trait shared by both hash maps
mod table;
/// Prime capacity and load-factor utilities
pub mod utils;

pub use chaining::{ChainingMap, DEFAULT_CAPACITY};
pub use mode::{Mode, find_mode};
pub use open_addressing::OpenAddressingMap;
pub use table::HashTable;
