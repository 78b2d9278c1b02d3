//! Unrolled name tables.
//!
//! A name table maps every literal string a registry's patterns can spell
//! out to the keys of the patterns that spell it. Tables are built offline
//! and consulted with an exact lookup, which is far cheaper than matching.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registry::PatternRegistry;

/// Index from unrolled names to pattern keys.
///
/// A name spelled by several patterns lists every key, in the order they were
/// added. In case-insensitive mode names are lower-cased on insert and lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NameTable<K> {
    names: BTreeMap<String, Vec<K>>,
    case_insensitive: bool,
}

impl<K> Default for NameTable<K> {
    fn default() -> Self {
        Self {
            names: BTreeMap::new(),
            case_insensitive: false,
        }
    }
}

impl<K: Clone + PartialEq> NameTable<K> {
    /// Creates an empty, case-sensitive table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table that folds names to lower case.
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self {
            names: BTreeMap::new(),
            case_insensitive: true,
        }
    }

    /// Builds a case-sensitive table from every pattern in `registry`.
    #[must_use]
    pub fn from_registry(registry: &PatternRegistry<K>) -> Self
    where
        K: Eq + Hash,
    {
        let mut table = Self::new();
        table.extend_from_registry(registry);
        table
    }

    /// Adds the unrolled names of every pattern in `registry`.
    pub fn extend_from_registry(&mut self, registry: &PatternRegistry<K>)
    where
        K: Eq + Hash,
    {
        for (key, pattern) in registry.iter() {
            for name in pattern.unroll() {
                self.insert(&name, key.clone());
            }
        }
    }

    /// Whether names are folded to lower case.
    #[must_use]
    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    fn normalize<'a>(&self, name: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            Cow::Owned(name.to_lowercase())
        } else {
            Cow::Borrowed(name)
        }
    }

    /// Maps `name` to `key`; a key already listed for the name is not repeated.
    pub fn insert(&mut self, name: &str, key: K) {
        let name = self.normalize(name).into_owned();
        let keys = self.names.entry(name).or_default();
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    /// Keys of the patterns that spell `name`.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&[K]> {
        self.names.get(&*self.normalize(name)).map(Vec::as_slice)
    }

    /// Returns true if some pattern spells `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(&*self.normalize(name))
    }

    /// All names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// `(name, keys)` pairs, in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[K])> {
        self.names.iter().map(|(n, k)| (n.as_str(), k.as_slice()))
    }

    /// Number of distinct names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table holds no names.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
