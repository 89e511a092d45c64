//! Hash functions consumed by the maps.
//!
//! A map only needs a pure `&str -> usize` mapping; it reduces the result modulo its
//! capacity and never inspects the distribution. Any `Fn(&str) -> usize` qualifies, as does
//! [`DefaultKeyHasher`], which delegates to the standard library's `SipHash`.

use std::hash::{DefaultHasher, Hash, Hasher};

/// A string hash function stored by a map for its whole lifetime
pub trait KeyHasher {
    /// Maps `key` to a non-negative integer
    fn hash_key(&self, key: &str) -> usize;
}

impl<F> KeyHasher for F
where
    F: Fn(&str) -> usize,
{
    fn hash_key(&self, key: &str) -> usize {
        self(key)
    }
}

/// Hashes keys with the standard library's default hasher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultKeyHasher;

impl KeyHasher for DefaultKeyHasher {
    #[allow(clippy::cast_possible_truncation)]
    fn hash_key(&self, key: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        hasher.finish() as usize
    }
}

/// Sums the Unicode scalar values of the key.
///
/// Anagrams collide, which makes it handy for exercising collision handling.
#[must_use]
pub fn sum_of_char_codes(key: &str) -> usize {
    key.chars().fold(0_usize, |hash, c| hash.wrapping_add(c as usize))
}

/// Sums the Unicode scalar values of the key, each weighted by its 1-based position
#[must_use]
pub fn weighted_char_codes(key: &str) -> usize {
    key.chars()
        .zip(1_usize..)
        .fold(0_usize, |hash, (c, weight)| hash.wrapping_add(weight.wrapping_mul(c as usize)))
}

#[cfg(test)]
#[allow(clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_sum_of_char_codes() {
        assert_eq!(sum_of_char_codes(""), 0);
        assert_eq!(sum_of_char_codes("a"), 97);
        assert_eq!(sum_of_char_codes("key1"), 107 + 101 + 121 + 49);
        assert_eq!(sum_of_char_codes("ab"), sum_of_char_codes("ba"));
    }

    #[test]
    fn test_weighted_char_codes() {
        assert_eq!(weighted_char_codes(""), 0);
        assert_eq!(weighted_char_codes("ab"), 97 + 2 * 98);
        assert_ne!(weighted_char_codes("ab"), weighted_char_codes("ba"));
    }

    #[test]
    fn test_closures_and_fns_are_hashers() {
        let constant = |_: &str| 7_usize;
        assert_eq!(constant.hash_key("anything"), 7);
        assert_eq!(sum_of_char_codes.hash_key("a"), 97);
    }

    #[test]
    fn test_default_hasher_is_deterministic() {
        let hasher = DefaultKeyHasher;
        assert_eq!(hasher.hash_key("apple"), hasher.hash_key("apple"));
        assert_ne!(hasher.hash_key("apple"), hasher.hash_key("banana"));
    }
}
