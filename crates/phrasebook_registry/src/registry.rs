//! Registry of compiled patterns.
//!
//! Stores patterns under caller-chosen keys and matches an input against all
//! of them at once, ranking the successful matches.

use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use phrasebook_foundation::{ErrorContext, Result};
use phrasebook_pattern::{MatchResult, Pattern};

// =============================================================================
// PatternRegistry
// =============================================================================

#[derive(Clone, Debug)]
struct Entry<K> {
    key: K,
    source: String,
    pattern: Pattern,
    priority: i32,
}

/// Compiled patterns stored by key.
///
/// Registration order is remembered and used as the final tie-breaker when
/// ranking matches. Registering an existing key replaces its pattern in place.
#[derive(Clone, Debug)]
pub struct PatternRegistry<K> {
    entries: Vec<Entry<K>>,
    index: HashMap<K, usize>,
}

impl<K> Default for PatternRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> PatternRegistry<K> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `grammar` and registers it under `key`.
    ///
    /// # Errors
    ///
    /// Returns the compile error, with the grammar text attached as context.
    pub fn register(&mut self, key: K, grammar: &str, priority: i32) -> Result<()> {
        let pattern = Pattern::compile(grammar).map_err(|e| {
            let mut context = ErrorContext::new().with_source(grammar);
            if let Some(position) = e.position() {
                context = context.with_position(position);
            }
            e.with_context(context)
        })?;
        self.insert(key, grammar.to_string(), pattern, priority);
        Ok(())
    }

    /// Registers an already compiled pattern under `key`.
    pub fn register_pattern(&mut self, key: K, pattern: Pattern, priority: i32) {
        let source = pattern.to_string();
        self.insert(key, source, pattern, priority);
    }

    fn insert(&mut self, key: K, source: String, pattern: Pattern, priority: i32) {
        let entry = Entry {
            key: key.clone(),
            source,
            pattern,
            priority,
        };
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Looks up the pattern registered under `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&Pattern> {
        self.index.get(key).map(|&slot| &self.entries[slot].pattern)
    }

    /// The grammar text `key` was registered with.
    #[must_use]
    pub fn source(&self, key: &K) -> Option<&str> {
        self.index
            .get(key)
            .map(|&slot| self.entries[slot].source.as_str())
    }

    /// The priority `key` was registered with.
    #[must_use]
    pub fn priority(&self, key: &K) -> Option<i32> {
        self.index.get(key).map(|&slot| self.entries[slot].priority)
    }

    /// Returns true if `key` is registered.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in registration order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|e| &e.key)
    }

    /// `(key, pattern)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Pattern)> {
        self.entries.iter().map(|e| (&e.key, &e.pattern))
    }

    /// Sets the greedy flag on every registered pattern.
    pub fn set_greedy(&mut self, greedy: bool) {
        for entry in &mut self.entries {
            entry.pattern.set_greedy(greedy);
        }
    }

    /// Matches `input` against every pattern and returns the successes, best
    /// first.
    ///
    /// Matches are ranked by priority (highest first), then by specificity
    /// (more top-level literal nodes first), then by registration order.
    #[must_use]
    pub fn match_all(&self, input: &str, allow_leftover: bool) -> Vec<RegistryMatch<'_, K>> {
        let mut matches: Vec<RegistryMatch<'_, K>> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let result = entry.pattern.matches(input, allow_leftover);
                result.is_success().then(|| RegistryMatch {
                    key: &entry.key,
                    priority: entry.priority,
                    specificity: entry.pattern.specificity(),
                    result,
                })
            })
            .collect();
        // Stable: equal ranks keep registration order.
        matches.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(b.specificity.cmp(&a.specificity))
        });
        matches
    }

    /// The best match for `input`, if any pattern matches.
    #[must_use]
    pub fn match_first(&self, input: &str, allow_leftover: bool) -> Option<RegistryMatch<'_, K>> {
        self.match_all(input, allow_leftover).into_iter().next()
    }

    /// Every registration as `(key, grammar, priority)` records.
    #[must_use]
    pub fn to_grammars(&self) -> Vec<RegisteredGrammar<K>> {
        self.entries
            .iter()
            .map(|e| RegisteredGrammar {
                key: e.key.clone(),
                grammar: e.source.clone(),
                priority: e.priority,
            })
            .collect()
    }

    /// Rebuilds a registry from saved records.
    ///
    /// # Errors
    ///
    /// Returns the first compile error.
    pub fn from_grammars(
        grammars: impl IntoIterator<Item = RegisteredGrammar<K>>,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for g in grammars {
            registry.register(g.key, &g.grammar, g.priority)?;
        }
        Ok(registry)
    }
}

/// A registration in source form, suitable for saving.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisteredGrammar<K> {
    /// The registry key.
    pub key: K,
    /// The grammar text.
    pub grammar: String,
    /// The priority.
    pub priority: i32,
}

// =============================================================================
// RegistryMatch
// =============================================================================

/// One successful match from [`PatternRegistry::match_all`].
#[derive(Clone, Debug)]
pub struct RegistryMatch<'r, K> {
    /// Key of the matching pattern.
    pub key: &'r K,
    /// The pattern's priority.
    pub priority: i32,
    /// The pattern's specificity.
    pub specificity: usize,
    /// The match itself.
    pub result: MatchResult<'r>,
}
