//! Linear blending of the content and collaborative components.
//!
//! `score(i) = w * content(i) + (1 - w) * collaborative(i)`, where an item
//! missing from a component scores 0 there. The result is the union of both
//! item sets, not the intersection. A component whose weight is exactly 0
//! contributes no items at all.

use crate::error::{RecError, Result};
use crate::recommend::scores::ScoreMap;

/// Rejects weights outside `[0, 1]`, including NaN.
pub fn validate_content_weight(content_weight: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&content_weight) {
        return Err(RecError::invalid("content_weight", content_weight, "[0, 1]"));
    }
    Ok(())
}

/// Blends two already-normalised components.
///
/// Output order before ranking is collaborative items first, then
/// content-only items, each in their own first-seen order.
pub fn blend(content: &ScoreMap, collaborative: &ScoreMap, content_weight: f32) -> ScoreMap {
    let collaborative_weight = 1.0 - content_weight;
    let mut scores = ScoreMap::new();

    if collaborative_weight > 0.0 {
        for (item, score) in collaborative.iter() {
            scores.add(item, collaborative_weight * score);
        }
    }
    if content_weight > 0.0 {
        for (item, score) in content.iter() {
            scores.add(item, content_weight * score);
        }
    }
    scores
}
