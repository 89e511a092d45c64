use std::{fmt, iter::FusedIterator};

use log::{debug, trace, warn};

use crate::{
    bucket::{Entry, Slot},
    error::{MapError, Result},
    hashing::{DefaultKeyHasher, KeyHasher},
};

/// Factor by which the table grows whenever an insertion would reach a load factor of one half
const GROWTH_FACTOR: usize = 2;

/// A string-keyed hash table resolving collisions by quadratic probing.
///
/// Each slot holds at most one entry. A key hashing to `start` is looked for at
/// `(start + i²) mod capacity` for `i = 0, 1, 2, …`. Removed entries leave a tombstone behind so
/// probe sequences running through the slot keep working. Before a new key goes in, the table
/// doubles its capacity until the entry fits below a load factor of one half, so the load
/// factor stays below one half after every operation.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, H = DefaultKeyHasher> {
    /// The slots of the table; its length is the capacity
    buckets: Vec<Slot<V>>,
    /// Number of live (non-tombstoned) entries
    size: usize,
    /// Hash function used for every key
    hasher: H,
}

impl<V> OpenAddressingMap<V> {
    /// Creates a map with `capacity` slots hashing keys with [`DefaultKeyHasher`]
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::new(capacity, DefaultKeyHasher)
    }
}

impl<V, H: KeyHasher> OpenAddressingMap<V, H> {
    /// Creates a map with `capacity` slots and the given hash function
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ZeroCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize, hasher: H) -> Result<Self> {
        if capacity == 0 {
            return Err(MapError::ZeroCapacity);
        }
        Ok(Self { buckets: empty_slots(capacity), size: 0, hasher })
    }

    /// Returns the number of live entries
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the ratio of live entries to slots
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.capacity() as f64
    }

    /// Counts the slots without a live entry, tombstones included
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|slot| slot.is_vacant()).count()
    }

    /// Returns the probe sequence for `key` under the current capacity
    fn probe(&self, key: &str) -> ProbeSequence {
        ProbeSequence::new(self.hasher.hash_key(key), self.capacity())
    }

    /// Finds the index of the live entry stored under `key`
    fn find(&self, key: &str) -> Option<usize> {
        for index in self.probe(key) {
            match self.buckets.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone(_) => {}
            }
        }
        None
    }

    /// First empty or tombstoned slot on the probe path of `key`.
    ///
    /// Only meaningful once `key` is known to be absent: a live entry further along the path
    /// must be updated in place instead.
    fn vacancy(&self, key: &str) -> Option<usize> {
        self.probe(key).find(|&index| self.buckets.get(index).is_some_and(Slot::is_vacant))
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.find(key)?;
        self.buckets.get(index).and_then(Slot::live).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find(key)?;
        match self.buckets.get_mut(index)? {
            Slot::Occupied(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone(_) => None,
        }
    }

    /// Returns true if a live entry is stored under `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes the entry stored under `key`, leaving a tombstone in its slot.
    ///
    /// Returns false, without touching the table, if the key is absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let buried =
            self.find(key).and_then(|index| self.buckets.get_mut(index)).is_some_and(Slot::bury);
        if buried {
            self.size = self.size.saturating_sub(1);
        }
        buried
    }

    /// Drops every entry and tombstone, keeping the capacity
    pub fn clear(&mut self) {
        self.buckets = empty_slots(self.capacity());
        self.size = 0;
    }

    /// Returns the live keys in slot order
    #[must_use]
    pub fn get_keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns an iterator over the live key-value pairs in slot order
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.buckets.iter() }
    }

    /// Inserts `value` under `key`, replacing the value of a live entry with the same key.
    ///
    /// A new key first grows the table, doubling its capacity until the map stays below a
    /// load factor of one half with the entry added. Overwriting never grows.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ProbeExhausted`] if the probe sequence of `key` visits only live
    /// entries holding other keys. The map is left unchanged, apart from a growth that may
    /// already have happened.
    pub fn put(&mut self, key: &str, value: V) -> Result<()> {
        if let Some(existing) = self.get_mut(key) {
            *existing = value;
            return Ok(());
        }

        let grown = capacity_for(self.size.saturating_add(1), self.capacity());
        if grown > self.capacity() {
            debug!(
                "one more entry in {} slots holding {} would reach half load, growing to {grown}",
                self.capacity(),
                self.size
            );
            self.resize_table(grown)?;
        }

        let Some(index) = self.vacancy(key) else {
            warn!("probe for key {key:?} exhausted a table of {} slots", self.capacity());
            return Err(MapError::ProbeExhausted { key: key.to_owned(), capacity: self.capacity() });
        };
        if let Some(slot) = self.buckets.get_mut(index) {
            *slot = Slot::Occupied(Entry::new(key.to_owned(), value));
            self.size = self.size.saturating_add(1);
        }
        Ok(())
    }

    /// Rebuilds the table with `new_capacity` slots, rehashing every live entry.
    ///
    /// Does nothing if `new_capacity` is 0 or smaller than the number of live entries. A
    /// capacity that would leave the table at least half full is doubled until it does not, so
    /// the rebuilt table may end up larger than requested. Entries are moved, in slot order,
    /// to the first free slot of their probe sequence, exactly where [`put`](Self::put) would
    /// place them. Tombstones are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::ProbeExhausted`] if an entry cannot be placed in the new table, in
    /// which case the map keeps its previous contents and capacity.
    pub fn resize_table(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity < 1 || new_capacity < self.size {
            trace!(
                "refusing to resize {} slots holding {} entries to {new_capacity}",
                self.capacity(),
                self.size
            );
            return Ok(());
        }
        let capacity = capacity_for(self.size, new_capacity);

        // Every target is decided before anything moves, so a failure leaves `self` intact.
        let mut taken = vec![false; capacity];
        let mut moves = Vec::with_capacity(self.size);
        for (from, slot) in self.buckets.iter().enumerate() {
            let Some(entry) = slot.live() else {
                continue;
            };
            let target = ProbeSequence::new(self.hasher.hash_key(&entry.key), capacity)
                .find(|&index| taken.get(index).is_some_and(|used| !used));
            let Some(to) = target else {
                warn!("probe for key {:?} exhausted {capacity} rebuilt slots", entry.key);
                return Err(MapError::ProbeExhausted { key: entry.key.clone(), capacity });
            };
            if let Some(used) = taken.get_mut(to) {
                *used = true;
            }
            moves.push((from, to));
        }

        let mut rebuilt = empty_slots(capacity);
        for (from, to) in moves {
            if let (Some(source), Some(target)) = (self.buckets.get_mut(from), rebuilt.get_mut(to))
            {
                *target = std::mem::take(source);
            }
        }

        debug!(
            "rebuilt table of {} slots into {capacity} slots holding {} entries",
            self.capacity(),
            self.size
        );
        self.buckets = rebuilt;
        Ok(())
    }
}

/// Smallest capacity reached by doubling `capacity` at which `entries` stay below half load
fn capacity_for(entries: usize, mut capacity: usize) -> usize {
    while entries.saturating_mul(2) >= capacity && capacity < usize::MAX {
        capacity = capacity.saturating_mul(GROWTH_FACTOR);
    }
    capacity
}

impl<V, H> fmt::Debug for OpenAddressingMap<V, H>
where
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("capacity", &self.buckets.len())
            .field("size", &self.size)
            .field("buckets", &self.buckets)
            .finish_non_exhaustive()
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

/// Creates a bucket array of `capacity` empty slots
fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, Slot::default);
    slots
}

/// Slot indices `(start + i²) mod capacity` for `i` in `0..capacity`.
///
/// `i²` and `(i + capacity)²` are congruent modulo `capacity`, so one period of `capacity`
/// steps already visits every slot the sequence can ever reach; probing longer would only
/// repeat indices.
#[derive(Debug, Clone)]
pub struct ProbeSequence {
    /// Home slot of the key
    start: usize,
    /// Table capacity
    capacity: usize,
    /// `i² mod capacity` for the next step
    offset: usize,
    /// Number of indices produced so far
    step: usize,
}

impl ProbeSequence {
    /// Starts the sequence for a raw hash value over a table of `capacity` slots
    #[must_use]
    pub fn new(hash: usize, capacity: usize) -> Self {
        Self { start: hash.checked_rem(capacity).unwrap_or(0), capacity, offset: 0, step: 0 }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.capacity {
            return None;
        }
        let index = (self.start + self.offset) % self.capacity;
        // (i + 1)² = i² + 2i + 1
        self.offset = (self.offset + 2 * self.step + 1) % self.capacity;
        self.step += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.capacity.saturating_sub(self.step);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeSequence {}

impl FusedIterator for ProbeSequence {}

/// Iterator over the live key-value pairs of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Remaining slots
    slots: std::slice::Iter<'a, Slot<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.by_ref().find_map(Slot::live).map(|entry| (entry.key.as_str(), &entry.value))
    }
}
