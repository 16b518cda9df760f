//! Global configuration constants and tunable scorer settings.
//!
//! Defaults are compile-time constants; runtime overrides are handled via CLI
//! arguments and environment variables in the `vidrec` binary and flow into
//! [`ScorerConfig`] / [`EvalConfig`].

use crate::error::{RecError, Result};
use crate::similarity::SimilarityKernel;
use serde::{Deserialize, Serialize};

/// Number of most similar users averaged by the collaborative component.
pub const DEFAULT_SIMILAR_USERS: usize = 10;

/// Number of the user's most-engaged items used as content sources.
pub const DEFAULT_SOURCE_ITEMS: usize = 20;

/// Number of content-similar items looked up per source item.
pub const DEFAULT_SIMILAR_ITEMS: usize = 10;

/// Weight of the content component in the blend. Collaborative weight is `1 - w`.
pub const DEFAULT_CONTENT_WEIGHT: f32 = 0.5;

/// Default number of recommendations returned.
pub const DEFAULT_RESULT_LENGTH: usize = 10;

/// Default cutoff `k` for ranking metrics.
pub const DEFAULT_EVAL_K: usize = 10;

/// Fraction of each user's interactions held out for evaluation.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Minimum engagement ratio for a held-out interaction to count as relevant.
///
/// A watch ratio of 2.0 means the video was watched twice through.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 2.0;

/// Seed for the train/test shuffle.
pub const DEFAULT_SPLIT_SEED: u64 = 42;

/// Upper bound on neighbourhood sizes (`similar_users`, `similar_items`, `source_items`).
pub const MAX_NEIGHBOURHOOD: usize = 10_000;

/// Tuning parameters of the hybrid scorer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Top-N similar users for the collaborative component.
    pub similar_users: usize,
    /// Top-K most engaged history items for the content component.
    pub source_items: usize,
    /// Top-M content neighbours per source item.
    pub similar_items: usize,
    /// Kernel used to build both similarity matrices.
    pub kernel: SimilarityKernel,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            similar_users: DEFAULT_SIMILAR_USERS,
            source_items: DEFAULT_SOURCE_ITEMS,
            similar_items: DEFAULT_SIMILAR_ITEMS,
            kernel: SimilarityKernel::Cosine,
        }
    }
}

impl ScorerConfig {
    /// Checks every neighbourhood size is in `1..=MAX_NEIGHBOURHOOD`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("similar_users", self.similar_users),
            ("source_items", self.source_items),
            ("similar_items", self.similar_items),
        ] {
            if value == 0 || value > MAX_NEIGHBOURHOOD {
                return Err(RecError::invalid(
                    name,
                    value,
                    format!("1..={MAX_NEIGHBOURHOOD}"),
                ));
            }
        }
        Ok(())
    }
}

/// Parameters of an offline evaluation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Ranking cutoff.
    pub k: usize,
    /// Held-out fraction per user, in `[0, 1)`.
    pub test_fraction: f64,
    /// Held-out rows at or above this ratio are relevant.
    pub relevance_threshold: f32,
    /// Shuffle seed.
    pub seed: u64,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_EVAL_K,
            test_fraction: DEFAULT_TEST_FRACTION,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
            seed: DEFAULT_SPLIT_SEED,
        }
    }
}

impl EvalConfig {
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(RecError::invalid("k", self.k, "> 0"));
        }
        if !(0.0..1.0).contains(&self.test_fraction) {
            return Err(RecError::invalid(
                "test_fraction",
                self.test_fraction,
                "[0, 1)",
            ));
        }
        if !self.relevance_threshold.is_finite() {
            return Err(RecError::invalid(
                "relevance_threshold",
                self.relevance_threshold,
                "finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scorer_config_is_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
        assert_eq!(ScorerConfig::default().similar_users, 10);
        assert_eq!(ScorerConfig::default().source_items, 20);
        assert_eq!(ScorerConfig::default().similar_items, 10);
    }

    #[test]
    fn test_zero_neighbourhood_rejected() {
        let cfg = ScorerConfig {
            similar_items: 0,
            ..ScorerConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("similar_items"));
    }

    #[test]
    fn test_eval_config_bounds() {
        assert!(EvalConfig::default().validate().is_ok());
        let bad = EvalConfig {
            test_fraction: 1.0,
            ..EvalConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = EvalConfig {
            k: 0,
            ..EvalConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_scorer_config_serde() {
        let cfg = ScorerConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"kernel\":\"cosine\""));
        let back: ScorerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
