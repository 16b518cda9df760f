//! Offline evaluation.
//!
//! Interactions are split per user into train and held-out rows; a session
//! built on the training rows recommends `k` items per user, and the
//! held-out rows above a relevance threshold are the ground truth. Metrics
//! compare feature tags, see [`metrics`].

/// Train, recommend, score, and average over users.
pub mod evaluator;
/// Precision, recall, F1, hit ratio and coverage on feature sets.
pub mod metrics;
/// Seeded per-user train/test split.
pub mod split;

pub use evaluator::{EvaluationReport, Evaluator};
pub use metrics::{coverage, f1_score, hit_ratio, precision_at_k, recall_at_k, RankingMetrics};
pub use split::{train_test_split, TrainTestSplit};
