//! Utility functions and traits shared by both map backends

use crate::{
    ChainedMap, OpenAddressingMap,
    error::Result,
    hashing::KeyHasher,
};

/// The operation set common to [`OpenAddressingMap`] and [`ChainedMap`].
///
/// `put` and `resize_table` return a `Result` because open addressing can run out of probe
/// slots; the chained implementation always succeeds.
pub trait StringMap<V> {
    /// Inserts or overwrites the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot place the key.
    fn put(&mut self, key: &str, value: V) -> Result<()>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if a value is stored under `key`
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes the entry stored under `key`, returning whether there was one
    fn remove(&mut self, key: &str) -> bool;

    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Rehashes the entries into `new_capacity` buckets
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot place an entry in the new table.
    fn resize_table(&mut self, new_capacity: usize) -> Result<()>;

    /// Counts the buckets holding no live entry
    fn empty_buckets(&self) -> usize;

    /// Returns the ratio of entries to buckets
    fn table_load(&self) -> f64;

    /// Returns the keys in bucket order
    fn get_keys(&self) -> Vec<String>;

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets
    fn capacity(&self) -> usize;
}

impl<V, H> StringMap<V> for OpenAddressingMap<V, H>
where
    H: KeyHasher,
{
    fn put(&mut self, key: &str, value: V) -> Result<()> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn contains_key(&self, key: &str) -> bool {
        Self::contains_key(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        Self::resize_table(self, new_capacity)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn get_keys(&self) -> Vec<String> {
        Self::get_keys(self)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }
}

impl<V, H> StringMap<V> for ChainedMap<V, H>
where
    H: KeyHasher,
{
    fn put(&mut self, key: &str, value: V) -> Result<()> {
        Self::put(self, key, value);
        Ok(())
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn remove(&mut self, key: &str) -> bool {
        Self::remove(self, key)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        Self::resize_table(self, new_capacity);
        Ok(())
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn get_keys(&self) -> Vec<String> {
        Self::get_keys(self)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }
}

/// Puts every pair of `pairs` into `map`, in iteration order
///
/// # Errors
///
/// Stops at and returns the first error reported by [`StringMap::put`]; pairs before it stay
/// inserted.
pub fn fill<M, V, K, I>(map: &mut M, pairs: I) -> Result<()>
where
    M: StringMap<V> + ?Sized,
    K: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    for (key, value) in pairs {
        map.put(key.as_ref(), value)?;
    }
    Ok(())
}
