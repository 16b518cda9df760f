//! Item feature tags.

use crate::dataset::interaction::ItemId;
use std::collections::{HashMap, HashSet};

/// Maps each item to its feature tags (categories, topics).
#[derive(Debug, Default, Clone)]
pub struct FeatureCatalog {
    tags: HashMap<ItemId, Vec<String>>,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tags of `item`, replacing any previous set.
    /// Repeated tags are dropped; first occurrence order is kept.
    pub fn insert<I, S>(&mut self, item: ItemId, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let unique: Vec<String> = tags
            .into_iter()
            .map(Into::<String>::into)
            .filter(|t| seen.insert(t.clone()))
            .collect();
        self.tags.insert(item, unique);
    }

    /// Tags of `item`; empty for unknown items.
    pub fn features(&self, item: ItemId) -> &[String] {
        self.tags.get(&item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Union of the tags of `items`.
    pub fn feature_set<'i, I>(&self, items: I) -> HashSet<&str>
    where
        I: IntoIterator<Item = &'i ItemId>,
    {
        items
            .into_iter()
            .flat_map(|item| self.features(*item))
            .map(String::as_str)
            .collect()
    }

    /// Number of distinct tags across the whole catalog.
    pub fn universe_size(&self) -> usize {
        self.tags
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len()
    }

    /// Whether `item` has an entry, possibly with no tags.
    pub fn contains(&self, item: ItemId) -> bool {
        self.tags.contains_key(&item)
    }

    /// Cataloged items, ascending.
    pub fn items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = self.tags.keys().copied().collect();
        items.sort_unstable();
        items
    }

    /// Number of cataloged items.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Parse a raw tag field such as `"[8, 27]"` or `"Comedy|Music"` into
/// lowercased tokens split on anything that is not alphanumeric or `_`.
/// Repeated tokens are kept once.
pub fn parse_tags(raw: &str) -> Vec<String> {
    let buffer = raw.to_lowercase();
    let mut tags: Vec<String> = Vec::new();
    for token in buffer.split(|c: char| !(c.is_alphanumeric() || c == '_')) {
        if !token.is_empty() && !tags.iter().any(|t| t == token) {
            tags.push(token.to_string());
        }
    }
    tags
}
