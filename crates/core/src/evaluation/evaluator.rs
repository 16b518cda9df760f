//! Offline evaluation of the hybrid scorer on a held-out split.

use crate::config::EvalConfig;
use crate::dataset::{FeatureCatalog, InteractionTable, ItemId, UserId};
use crate::error::Result;
use crate::evaluation::metrics::RankingMetrics;
use crate::recommend::hybrid::validate_content_weight;
use crate::recommend::ScoringSession;
use serde::Serialize;

/// Aggregate result of one evaluation run.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub content_weight: f32,
    pub k: usize,
    /// Users that had relevant held-out items and were scored.
    pub users_evaluated: usize,
    /// Users with held-out rows but nothing relevant, or unknown to the session.
    pub users_skipped: usize,
    /// Mean of the per-user metrics.
    pub mean: RankingMetrics,
}

/// Scores every held-out user with a trained session and averages the metrics.
pub struct Evaluator<'a> {
    session: &'a ScoringSession,
    test: &'a InteractionTable,
    catalog: &'a FeatureCatalog,
    config: EvalConfig,
}

impl<'a> Evaluator<'a> {
    /// `session` must be built on the training part of the split that
    /// produced `test`.
    pub fn new(
        session: &'a ScoringSession,
        test: &'a InteractionTable,
        catalog: &'a FeatureCatalog,
        config: EvalConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            session,
            test,
            catalog,
            config,
        })
    }

    /// Held-out items of `user` at or above the relevance threshold.
    fn relevant_items(&self, user: UserId) -> Vec<ItemId> {
        self.test
            .user_rows(user)
            .filter(|row| row.engagement_ratio >= self.config.relevance_threshold)
            .map(|row| row.item_id)
            .collect()
    }

    pub fn evaluate(&self, content_weight: f32) -> Result<EvaluationReport> {
        validate_content_weight(content_weight)?;
        let k = self.config.k;
        let mut samples = Vec::new();
        let mut skipped = 0usize;

        for user in self.test.users() {
            let relevant = self.relevant_items(user);
            if relevant.is_empty() || !self.session.contains_user(user) {
                skipped += 1;
                continue;
            }
            let recommended: Vec<ItemId> = self
                .session
                .recommend(user, content_weight, k)?
                .into_iter()
                .map(|r| r.item_id)
                .collect();
            samples.push(RankingMetrics::at_k(
                &recommended,
                &relevant,
                self.catalog,
                k,
            ));
        }

        let report = EvaluationReport {
            content_weight,
            k,
            users_evaluated: samples.len(),
            users_skipped: skipped,
            mean: RankingMetrics::mean(&samples),
        };
        tracing::info!(
            "Evaluated w={:.2} on {} users ({} skipped): precision@{k}={:.4} recall@{k}={:.4} f1@{k}={:.4} hit@{k}={:.4} coverage@{k}={:.4}",
            content_weight,
            report.users_evaluated,
            report.users_skipped,
            report.mean.precision,
            report.mean.recall,
            report.mean.f1,
            report.mean.hit_ratio,
            report.mean.coverage,
        );
        Ok(report)
    }

    /// One report per content weight, in the given order.
    pub fn sweep(&self, content_weights: &[f32]) -> Result<Vec<EvaluationReport>> {
        content_weights.iter().map(|&w| self.evaluate(w)).collect()
    }
}
