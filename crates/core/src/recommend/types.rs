//! Recommendation output.

use crate::dataset::ItemId;
use serde::{Deserialize, Serialize};

/// One ranked item with its blended score.
///
/// Scores lie in `[0, 1]`: both components are normalised to a maximum of 1
/// and the weights sum to 1. They are comparable within one call only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item_id: ItemId,
    pub score: f32,
}
