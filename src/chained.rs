use std::fmt;

use log::{debug, trace};

use crate::{
    bucket::Chain,
    error::{MapError, Result},
    hashing::{DefaultKeyHasher, KeyHasher},
};

/// A string-keyed hash table resolving collisions by separate chaining.
///
/// Every bucket owns a singly linked chain of the entries hashed to it. The table never grows
/// on its own: [`put`](Self::put) keeps prepending to the chains however long they get, and the
/// capacity only changes through [`resize_table`](Self::resize_table).
///
/// Note: This implementation is not thread-safe.
pub struct ChainedMap<V, H = DefaultKeyHasher> {
    /// One chain per bucket; its length is the capacity
    buckets: Vec<Chain<V>>,
    /// Number of entries across all chains
    size: usize,
    /// Hash function used for every key
    hasher: H,
}

impl<V> ChainedMap<V> {
    /// Creates a map with `capacity` buckets hashing keys with [`DefaultKeyHasher`]
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, DefaultKeyHasher)
    }
}

impl<V, H: KeyHasher> ChainedMap<V, H> {
    /// Creates a map with `capacity` buckets and the given hash function
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize, hasher: H) -> Result<Self> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        Ok(Self { buckets: empty_chains(capacity), size: 0, hasher })
    }

    /// Returns the number of entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of entries to buckets, which may exceed 1
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts the buckets whose chain is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Length of the longest chain
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Index of the bucket `key` hashes to under `capacity` buckets
    fn bucket_index(&self, key: &str, capacity: usize) -> usize {
        self.hasher.hash_key(key).checked_rem(capacity).unwrap_or(0)
    }

    /// The chain `key` belongs to
    fn chain(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key, self.capacity()))
    }

    /// The chain `key` belongs to, for modification
    fn chain_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.bucket_index(key, self.capacity());
        self.buckets.get_mut(index)
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.chain(key)?.find(key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.chain_mut(key)?.value_mut(key)
    }

    /// Returns true if an entry is stored under `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts `value` under `key`, replacing the value of an existing entry with the same key.
    ///
    /// New entries are prepended to their bucket's chain. The capacity never changes here.
    pub fn put(&mut self, key: &str, value: V) {
        let Some(chain) = self.chain_mut(key) else {
            return;
        };
        if let Some(existing) = chain.value_mut(key) {
            *existing = value;
            return;
        }
        chain.push_front(key.to_owned(), value);
        self.size = self.size.saturating_add(1);
    }

    /// Unlinks and drops the entry stored under `key`.
    ///
    /// Returns false, without touching the table, if the key is absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.chain_mut(key).and_then(|chain| chain.remove(key)).is_some();
        if removed {
            self.size = self.size.saturating_sub(1);
        }
        removed
    }

    /// Drops every entry, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_chains(self.capacity());
        self.size = 0;
    }

    /// Rehashes every entry into `new_capacity` buckets.
    ///
    /// Does nothing if `new_capacity` is 0. Unlike [`OpenAddressingMap`] there is no lower bound
    /// tied to the number of entries: shrinking below it just makes the chains longer. Nodes are
    /// moved into the new bucket array, never copied.
    ///
    /// [`OpenAddressingMap`]: crate::OpenAddressingMap
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            trace!("refusing to resize {} buckets to 0", self.capacity());
            return;
        }

        let mut rebuilt = empty_chains(new_capacity);
        for chain in &mut self.buckets {
            while let Some(node) = chain.pop_front_node() {
                let index = self.hasher.hash_key(&node.key).checked_rem(new_capacity).unwrap_or(0);
                if let Some(target) = rebuilt.get_mut(index) {
                    target.push_front_node(node);
                }
            }
        }

        debug!(
            "rehashed {} entries from {} buckets into {new_capacity} buckets",
            self.size,
            self.capacity()
        );
        self.buckets = rebuilt;
    }

    /// Returns the keys in bucket order, and within a bucket in chain order
    #[must_use]
    pub fn get_keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns an iterator over the key-value pairs in bucket order, then chain order
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.buckets.iter().flat_map(Chain::iter)
    }
}

impl<V, H> fmt::Debug for ChainedMap<V, H>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("capacity", &self.buckets.len())
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
    }
}

impl<V: fmt::Display, H> fmt::Display for ChainedMap<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Creates a bucket array of `capacity` empty chains
fn empty_chains<V>(capacity: usize) -> Vec<Chain<V>> {
    let mut chains = Vec::with_capacity(capacity);
    chains.resize_with(capacity, Chain::new);
    chains
}
