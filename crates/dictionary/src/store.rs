//! The merged dictionary store.
//!
//! Rules live in a `Vec` preserving first-insertion order (fuzzy lookup
//! iterates it) with a `HashMap` index for exact lookup. Merging a later
//! source overwrites duplicate keys in place, so override changes a rule's
//! content but never its position — fuzzy iteration order stays stable
//! across merges of the same source set.

use crate::builtin::builtin_rules;
use crate::loader;
use crate::model::{DictionaryRule, RuleSource};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// The merged, read-only rule dictionary.
pub struct DictionaryStore {
    rules: Vec<DictionaryRule>,
    index: HashMap<String, usize>,
    source_count: usize,
    loaded_at: DateTime<Utc>,
}

/// Load-time statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DictionaryStats {
    /// Total merged rules.
    pub rule_count: usize,
    /// Sources merged (builtin included).
    pub source_count: usize,
    /// When the store was constructed.
    pub loaded_at: DateTime<Utc>,
}

impl DictionaryStore {
    /// An empty store. Mostly useful in tests.
    pub fn empty() -> Self {
        Self {
            rules: Vec::new(),
            index: HashMap::new(),
            source_count: 0,
            loaded_at: Utc::now(),
        }
    }

    /// A store holding only the built-in rule table.
    pub fn builtin() -> Self {
        let mut store = Self::empty();
        store.merge(builtin_rules());
        store
    }

    /// A store built from the built-in table plus the given external
    /// sources, merged in order.
    ///
    /// Missing or malformed sources are logged and skipped — loading is
    /// never fatal, and one bad file does not prevent the rest from
    /// merging.
    pub fn load(paths: &[impl AsRef<Path>]) -> Self {
        let mut store = Self::builtin();
        for path in paths {
            let path = path.as_ref();
            match loader::load_source(path) {
                Ok(source) => {
                    let added = source.rules.len();
                    store.merge(source);
                    info!(path = %path.display(), rules = added, "Merged dictionary source");
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping dictionary source");
                }
            }
        }
        info!(
            rules = store.len(),
            sources = store.source_count,
            "Dictionary loaded"
        );
        store
    }

    /// Merge one source. Later entries override earlier ones for duplicate
    /// keys (last-writer-wins), keeping the key's original position.
    pub fn merge(&mut self, source: RuleSource) {
        for rule in source.rules {
            match self.index.get(&rule.key) {
                Some(&pos) => self.rules[pos] = rule,
                None => {
                    self.index.insert(rule.key.clone(), self.rules.len());
                    self.rules.push(rule);
                }
            }
        }
        self.source_count += 1;
    }

    /// Exact lookup against a normalized (trimmed, lowercased) query.
    pub fn exact(&self, normalized_query: &str) -> Option<&DictionaryRule> {
        self.index.get(normalized_query).map(|&pos| &self.rules[pos])
    }

    /// Fuzzy lookup: substring containment in either direction, first
    /// match in insertion order wins.
    pub fn fuzzy(&self, normalized_query: &str) -> Option<&DictionaryRule> {
        if normalized_query.is_empty() {
            return None;
        }
        self.rules.iter().find(|rule| {
            normalized_query.contains(rule.key.as_str()) || rule.key.contains(normalized_query)
        })
    }

    /// Iterate rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DictionaryRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            rule_count: self.rules.len(),
            source_count: self.source_count,
            loaded_at: self.loaded_at,
        }
    }
}
