//! Per-item score accumulator that remembers first-seen order.

use crate::dataset::ItemId;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::HashMap;

/// Item → score map iterated in the order items were first added.
///
/// First-seen order is the tie-break for every ranking the scorer produces,
/// so identical inputs always yield identical output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreMap {
    entries: Vec<(ItemId, f32)>,
    /// item → position in `entries`
    positions: HashMap<ItemId, usize>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `score` to the item's running total, inserting it at 0 first.
    pub fn add(&mut self, item: ItemId, score: f32) {
        match self.positions.get(&item) {
            Some(&pos) => self.entries[pos].1 += score,
            None => {
                self.positions.insert(item, self.entries.len());
                self.entries.push((item, score));
            }
        }
    }

    pub fn get(&self, item: ItemId) -> Option<f32> {
        self.positions.get(&item).map(|&pos| self.entries[pos].1)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.positions.contains_key(&item)
    }

    /// Multiplies every score by `factor`.
    pub fn scale(&mut self, factor: f32) {
        for (_, score) in &mut self.entries {
            *score *= factor;
        }
    }

    pub fn max(&self) -> Option<f32> {
        self.entries
            .iter()
            .map(|&(_, s)| s)
            .max_by_key(|&s| OrderedFloat(s))
    }

    /// Divides every score by the maximum score. Left untouched when the map
    /// is empty or the maximum is not positive.
    pub fn normalize_by_max(&mut self) {
        if let Some(max) = self.max() {
            if max > 0.0 {
                for (_, score) in &mut self.entries {
                    *score /= max;
                }
            }
        }
    }

    /// Drops every entry for which `keep` returns false, preserving order.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(ItemId, f32) -> bool,
    {
        self.entries.retain(|&(item, score)| keep(item, score));
        self.positions = self
            .entries
            .iter()
            .enumerate()
            .map(|(pos, &(item, _))| (item, pos))
            .collect();
    }

    /// Entries by descending score; equal scores keep first-seen order.
    pub fn ranked(&self) -> Vec<(ItemId, f32)> {
        let mut ranked = self.entries.clone();
        ranked.sort_by_key(|&(_, score)| Reverse(OrderedFloat(score)));
        ranked
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, f32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(ItemId, f32)> for ScoreMap {
    fn from_iter<I: IntoIterator<Item = (ItemId, f32)>>(iter: I) -> Self {
        let mut map = ScoreMap::new();
        for (item, score) in iter {
            map.add(item, score);
        }
        map
    }
}
