//! # vidrec-core
//!
//! Hybrid short-video recommender: a user-user collaborative signal and an
//! item-item TF-IDF content signal, each normalised by its maximum, are blended
//! with a single content weight into one ranked list of unseen items.
//!
//! ```text
//! InteractionTable ──► user × user SimilarityMatrix ──┐
//!                                                     ├─► ScoringSession::recommend
//! FeatureCatalog ──► TF-IDF ──► item × item matrix ───┘
//! ```
//!
//! This is the core library crate with no I/O; CSV loading and the command
//! line live in `vidrec-cli`.

/// Compile-time defaults plus the runtime scorer and evaluation settings.
pub mod config;
/// Typed interaction records, user history and item feature tags.
pub mod dataset;
/// Error type shared by all modules.
pub mod error;
/// Feature-set ranking metrics, train/test splitting and the evaluation harness.
pub mod evaluation;
/// Hybrid scorer: collaborative and content components, normalisation and blending.
pub mod recommend;
/// Sparse vectors, similarity kernels, TF-IDF and dense similarity matrices.
pub mod similarity;

pub use config::{EvalConfig, ScorerConfig};
pub use dataset::{FeatureCatalog, Interaction, InteractionTable, ItemId, UserId};
pub use error::{RecError, Result};
pub use recommend::{Recommendation, ScoringSession};
