//! Hybrid recommender.
//!
//! A [`ScoringSession`] holds the interaction table and both similarity
//! matrices, built once and read-only afterwards. Every call to
//! [`ScoringSession::recommend`] computes a collaborative and a content
//! component, normalises each by its maximum, blends them with
//! [`hybrid::blend`] and ranks the unseen items.

/// Linear blend of the two normalised components.
pub mod hybrid;
/// Ordered per-item score accumulator.
pub mod scores;
/// Scoring session: component computation and ranking.
pub mod session;
/// Output record types.
pub mod types;

pub use hybrid::blend;
pub use scores::ScoreMap;
pub use session::ScoringSession;
pub use types::Recommendation;
