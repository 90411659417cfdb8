//! Collection aliases backed by AHash.
//!
//! Hash maps are used for lookups that never need ordering. Where the caller's
//! insertion order matters (pie categories, distinct axis values) use
//! [`OrderedMap`].

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

/// Insertion-ordered map with AHash hashing.
pub type OrderedMap<K, V> = indexmap::IndexMap<K, V, RandomState>;

/// Create an empty [`OrderedMap`].
pub fn ordered_map<K, V>() -> OrderedMap<K, V> {
    OrderedMap::with_hasher(RandomState::new())
}
