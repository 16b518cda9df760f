//! `recommend` and `evaluate` commands.

use crate::dataset::{load_features, load_interactions};
use anyhow::{Context, Result};
use std::path::PathBuf;
use vidrec_core::evaluation::{train_test_split, EvaluationReport, Evaluator};
use vidrec_core::{EvalConfig, Recommendation, ScorerConfig, ScoringSession, UserId};

/// Input file locations.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub interactions: PathBuf,
    pub features: PathBuf,
}

/// Builds a session on the full interaction log and ranks items for `user`.
pub fn recommend(
    data: &DataPaths,
    scorer: ScorerConfig,
    user: u32,
    content_weight: f32,
    top: usize,
) -> Result<Vec<Recommendation>> {
    let (table, _) = load_interactions(&data.interactions)?;
    let catalog = load_features(&data.features)?;
    let session = ScoringSession::build(table, &catalog, scorer)
        .context("failed to build scoring session")?;
    let recs = session
        .recommend(UserId(user), content_weight, top)
        .with_context(|| format!("failed to recommend for user {user}"))?;
    Ok(recs)
}

/// Splits the log, builds a session on the training part and evaluates
/// every content weight on the held-out part.
pub fn evaluate(
    data: &DataPaths,
    scorer: ScorerConfig,
    eval: EvalConfig,
    content_weights: &[f32],
) -> Result<Vec<EvaluationReport>> {
    // reject bad flags before loading any CSV
    eval.validate()?;
    let (table, _) = load_interactions(&data.interactions)?;
    let catalog = load_features(&data.features)?;
    let split = train_test_split(&table, eval.test_fraction, eval.seed);
    let session = ScoringSession::build(split.train, &catalog, scorer)
        .context("failed to build scoring session")?;
    let evaluator = Evaluator::new(&session, &split.test, &catalog, eval)?;
    Ok(evaluator.sweep(content_weights)?)
}
