//! Interaction records and the append-only interaction table.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt;

/// Identifier of a user.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(pub u32);

/// Identifier of an item (a video).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One observed interaction.
///
/// `engagement_ratio` is watch time divided by video duration: 0.5 means half
/// the video was watched, 3.0 means it was watched three times through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub engagement_ratio: f32,
}

impl Interaction {
    pub fn new(user_id: u32, item_id: u32, engagement_ratio: f32) -> Self {
        Self {
            user_id: UserId(user_id),
            item_id: ItemId(item_id),
            engagement_ratio,
        }
    }

    fn is_valid(&self) -> bool {
        self.engagement_ratio.is_finite() && self.engagement_ratio >= 0.0
    }
}

/// Row counts from [`InteractionTable::from_records`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleaningStats {
    /// Rows stored.
    pub accepted: usize,
    /// Rows dropped for a NaN, infinite or negative ratio.
    pub invalid: usize,
    /// Rows dropped because the (user, item) pair was already stored.
    pub duplicates: usize,
}

enum InsertOutcome {
    Stored,
    Invalid,
    Duplicate,
}

/// Append-only table of interactions, at most one row per (user, item) pair.
#[derive(Debug, Default, Clone)]
pub struct InteractionTable {
    rows: Vec<Interaction>,
    /// user → row indices, insertion order
    by_user: HashMap<UserId, Vec<usize>>,
    /// (user, item) → row index
    pairs: HashMap<(UserId, ItemId), usize>,
}

impl InteractionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from raw rows, dropping invalid ratios and duplicate
    /// pairs. The first row for a pair wins.
    pub fn from_records<I>(records: I) -> (Self, CleaningStats)
    where
        I: IntoIterator<Item = Interaction>,
    {
        let mut table = Self::new();
        let mut stats = CleaningStats::default();
        for record in records {
            match table.try_insert(record) {
                InsertOutcome::Stored => stats.accepted += 1,
                InsertOutcome::Invalid => stats.invalid += 1,
                InsertOutcome::Duplicate => stats.duplicates += 1,
            }
        }
        if stats.invalid > 0 || stats.duplicates > 0 {
            tracing::warn!(
                "Dropped {} invalid and {} duplicate interaction rows",
                stats.invalid,
                stats.duplicates
            );
        }
        (table, stats)
    }

    /// Appends a row. Returns `false` if the ratio is not a finite
    /// non-negative number or the pair is already present.
    pub fn insert(&mut self, interaction: Interaction) -> bool {
        matches!(self.try_insert(interaction), InsertOutcome::Stored)
    }

    fn try_insert(&mut self, interaction: Interaction) -> InsertOutcome {
        if !interaction.is_valid() {
            return InsertOutcome::Invalid;
        }
        let key = (interaction.user_id, interaction.item_id);
        if self.pairs.contains_key(&key) {
            return InsertOutcome::Duplicate;
        }
        let row = self.rows.len();
        self.rows.push(interaction);
        self.pairs.insert(key, row);
        self.by_user
            .entry(interaction.user_id)
            .or_default()
            .push(row);
        InsertOutcome::Stored
    }

    /// Items the user interacted with, by descending engagement ratio.
    /// Equal ratios keep insertion order. Unknown users have an empty history.
    pub fn history(&self, user: UserId) -> Vec<(ItemId, f32)> {
        let mut history: Vec<(ItemId, f32)> = self
            .by_user
            .get(&user)
            .map(|rows| {
                rows.iter()
                    .map(|&r| (self.rows[r].item_id, self.rows[r].engagement_ratio))
                    .collect()
            })
            .unwrap_or_default();
        history.sort_by_key(|&(_, ratio)| Reverse(OrderedFloat(ratio)));
        history
    }

    /// Raw rows of one user in insertion order.
    pub fn user_rows(&self, user: UserId) -> impl Iterator<Item = &Interaction> + '_ {
        self.by_user
            .get(&user)
            .into_iter()
            .flatten()
            .map(move |&r| &self.rows[r])
    }

    /// Engagement ratio of `user` on `item`, if they interacted.
    pub fn engagement(&self, user: UserId, item: ItemId) -> Option<f32> {
        self.pairs
            .get(&(user, item))
            .map(|&r| self.rows[r].engagement_ratio)
    }

    /// Whether the (user, item) pair is in the table.
    pub fn has_interacted(&self, user: UserId, item: ItemId) -> bool {
        self.pairs.contains_key(&(user, item))
    }

    /// Whether `user` has at least one row.
    pub fn contains_user(&self, user: UserId) -> bool {
        self.by_user.contains_key(&user)
    }

    /// Distinct users, ascending.
    pub fn users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.by_user.keys().copied().collect();
        users.sort_unstable();
        users
    }

    /// Distinct items, ascending.
    pub fn items(&self) -> Vec<ItemId> {
        let mut items: Vec<ItemId> = self.rows.iter().map(|r| r.item_id).collect();
        items.sort_unstable();
        items.dedup();
        items
    }

    /// Accepted rows in insertion order.
    pub fn rows(&self) -> &[Interaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Interaction> for InteractionTable {
    fn from_iter<I: IntoIterator<Item = Interaction>>(iter: I) -> Self {
        Self::from_records(iter).0
    }
}
