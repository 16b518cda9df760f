//! Typed input records.
//!
//! [`InteractionTable`] holds cleaned (user, item, engagement ratio) rows and
//! derives each user's history on demand. [`FeatureCatalog`] maps items to
//! their feature tags, which feed both TF-IDF and the feature-set metrics.

/// Per-item feature tags and tag parsing.
pub mod features;
/// Interaction records, identifiers and the interaction table.
pub mod interaction;

pub use features::{parse_tags, FeatureCatalog};
pub use interaction::{CleaningStats, Interaction, InteractionTable, ItemId, UserId};
