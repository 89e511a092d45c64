//! # strmap
//!
//! String-keyed hash maps with two collision-resolution strategies behind one contract.
//!
//! This crate provides two hash map implementations:
//!
//! - `OpenAddressingMap`: one entry per slot, quadratic probing, tombstone deletion, and
//!   automatic doubling that keeps the table below half full
//! - `ChainedMap`: one singly linked chain per bucket, resized only on request
//!
//! Both take their hash function at construction time: any `Fn(&str) -> usize`, or
//! [`DefaultKeyHasher`]. The [`StringMap`] trait names the operations they share.
//!
//! ## Basic Usage
//!
//! ```rust
//! use strmap::{OpenAddressingMap, sum_of_char_codes};
//!
//! # fn main() -> Result<(), strmap::MapError> {
//! // Create a map with 10 slots
//! let mut map = OpenAddressingMap::new(10, sum_of_char_codes)?;
//!
//! // Insert values
//! map.put("key1", 10)?;
//! map.put("key2", 20)?;
//!
//! // Update values
//! map.put("key1", 30)?;
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("key1"), Some(&30));
//!
//! // Remove values
//! map.remove("key1");
//! assert!(!map.contains_key("key1"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Chaining
//!
//! ```rust
//! use strmap::{ChainedMap, sum_of_char_codes};
//!
//! # fn main() -> Result<(), strmap::MapError> {
//! let mut map = ChainedMap::new(2, sum_of_char_codes)?;
//! for i in 0..10 {
//!     map.put(&format!("key{i}"), i);
//! }
//!
//! // The chained map never grows by itself
//! assert_eq!(map.capacity(), 2);
//! assert_eq!(map.table_load(), 5.0);
//!
//! map.resize_table(20);
//! assert_eq!(map.capacity(), 20);
//! assert_eq!(map.get("key7"), Some(&7));
//! # Ok(())
//! # }
//! ```

/// Entry, slot and chain types stored in the bucket arrays
mod bucket;
/// Module implementing the separate-chaining hash map
mod chained;
/// Error type shared by the maps
mod error;
/// Hash function contract and sample hash functions
mod hashing;
/// Module implementing the quadratic-probing hash map
mod open_addressing;
/// Shared contract trait and helpers
mod utils;

pub use chained::ChainedMap;
pub use error::{MapError, Result};
pub use hashing::{DefaultKeyHasher, KeyHasher, sum_of_char_codes, weighted_char_codes};
pub use open_addressing::{Iter, OpenAddressingMap, ProbeSequence};
pub use utils::{StringMap, fill};
