//! Error types shared by both map backends

use thiserror::Error;

/// Failures reported by map construction and insertion.
///
/// Lookups and removals never fail: an absent key is reported through `None` or `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    /// A bucket array must hold at least one bucket
    #[error("hash map capacity must be at least 1")]
    ZeroCapacity,
    /// Quadratic probing ran a full period without finding the key or a free slot
    #[error("probe sequence for key `{key}` exhausted all reachable slots of a {capacity}-slot table")]
    ProbeExhausted {
        /// The key being inserted
        key: String,
        /// Capacity of the table at the time of the failed insertion
        capacity: usize,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, MapError>;
