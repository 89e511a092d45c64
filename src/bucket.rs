//! Bucket contents for both backends: slots for open addressing, chains for separate chaining.

use std::fmt;

/// A key-value pair stored in an open-addressing slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry<V> {
    /// The key in the key-value pair
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: V,
}

impl<V> Entry<V> {
    /// Creates a new entry
    pub(crate) fn new(key: String, value: V) -> Self {
        Self { key, value }
    }
}

/// State of a single open-addressing slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot<V> {
    /// Never used since the table was built or cleared
    Empty,
    /// Removed entry, kept so probe sequences passing through stay intact
    Tombstone(Entry<V>),
    /// Live entry
    Occupied(Entry<V>),
}

impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V> Slot<V> {
    /// Returns true if the slot holds no live entry
    pub(crate) fn is_vacant(&self) -> bool {
        !matches!(self, Self::Occupied(_))
    }

    /// Turns a live entry into a tombstone, keeping its key and value.
    ///
    /// Returns false and leaves the slot as it was if it held no live entry.
    pub(crate) fn bury(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Occupied(entry) => {
                *self = Self::Tombstone(entry);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }

    /// Returns the live entry, if any
    pub(crate) fn live(&self) -> Option<&Entry<V>> {
        match self {
            Self::Occupied(entry) => Some(entry),
            Self::Empty | Self::Tombstone(_) => None,
        }
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("None"),
            Self::Tombstone(entry) => write!(f, "K: {} V: {} TS: true", entry.key, entry.value),
            Self::Occupied(entry) => write!(f, "K: {} V: {} TS: false", entry.key, entry.value),
        }
    }
}

/// A node of a bucket chain
#[derive(Debug)]
pub(crate) struct Node<V> {
    /// The key in the key-value pair
    pub(crate) key: String,
    /// The value associated with the key
    pub(crate) value: V,
    /// The following node in the same bucket
    next: Option<Box<Node<V>>>,
}

/// Singly linked list of the nodes hashed to one bucket.
///
/// The chain owns its head and every node owns its successor.
#[derive(Debug)]
pub(crate) struct Chain<V> {
    /// First node of the chain
    head: Option<Box<Node<V>>>,
    /// Number of nodes in the chain
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty chain
    pub(crate) const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Number of nodes in the chain
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the chain holds no nodes
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocates a node for the pair and links it in front of the current head
    pub(crate) fn push_front(&mut self, key: String, value: V) {
        self.push_front_node(Box::new(Node { key, value, next: None }));
    }

    /// Links an existing node in front of the current head
    pub(crate) fn push_front_node(&mut self, mut node: Box<Node<V>>) {
        node.next = self.head.take();
        self.head = Some(node);
        self.len = self.len.saturating_add(1);
    }

    /// Unlinks the head node and hands it over without touching its key or value
    pub(crate) fn pop_front_node(&mut self) -> Option<Box<Node<V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len = self.len.saturating_sub(1);
        Some(node)
    }

    /// Finds the node holding `key`
    pub(crate) fn find(&self, key: &str) -> Option<&Node<V>> {
        self.iter_nodes().find(|node| node.key == key)
    }

    /// Returns the value stored under `key` for modification
    pub(crate) fn value_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut link = self.head.as_deref_mut();
        while let Some(node) = link {
            if node.key == key {
                return Some(&mut node.value);
            }
            link = node.next.as_deref_mut();
        }
        None
    }

    /// Unlinks and drops the node holding `key`, returning its value
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut link = &mut self.head;
        while link.as_ref().is_some_and(|node| node.key != key) {
            link = &mut link.as_mut()?.next;
        }
        let mut removed = link.take()?;
        *link = removed.next.take();
        self.len = self.len.saturating_sub(1);
        Some(removed.value)
    }

    /// Iterates over the nodes from head to tail
    fn iter_nodes(&self) -> impl Iterator<Item = &Node<V>> {
        std::iter::successors(self.head.as_deref(), |node| node.next.as_deref())
    }

    /// Iterates over the key-value pairs from head to tail
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.iter_nodes().map(|node| (node.key.as_str(), &node.value))
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink node by node; the default recursive drop can overflow the stack on long chains.
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "({key}: {value})")?;
        }
        f.write_str("]")
    }
}
