//! Ranking metrics over feature sets.
//!
//! Recommended and relevant item lists are first mapped through their
//! feature tags; precision, recall and the rest compare those tag sets
//! rather than raw item ids. Two different videos in the same category count
//! as a match.

use crate::dataset::{FeatureCatalog, ItemId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use std::ops::AddAssign;

/// `|recommended ∩ relevant| / k`; 0 when `k` is 0.
pub fn precision_at_k<T: Eq + Hash>(
    recommended: &HashSet<T>,
    relevant: &HashSet<T>,
    k: usize,
) -> f64 {
    if k == 0 {
        return 0.0;
    }
    recommended.intersection(relevant).count() as f64 / k as f64
}

/// `|recommended ∩ relevant| / |relevant|`; 0 when nothing is relevant.
pub fn recall_at_k<T: Eq + Hash>(recommended: &HashSet<T>, relevant: &HashSet<T>) -> f64 {
    if relevant.is_empty() {
        return 0.0;
    }
    recommended.intersection(relevant).count() as f64 / relevant.len() as f64
}

/// Harmonic mean of precision and recall; 0 when both are 0.
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    let sum = precision + recall;
    if sum <= 0.0 {
        return 0.0;
    }
    2.0 * precision * recall / sum
}

/// 1 if the sets overlap, else 0.
pub fn hit_ratio<T: Eq + Hash>(recommended: &HashSet<T>, relevant: &HashSet<T>) -> f64 {
    if recommended.intersection(relevant).next().is_some() {
        1.0
    } else {
        0.0
    }
}

/// `|recommended| / universe`; 0 for an empty universe.
pub fn coverage(recommended_len: usize, universe: usize) -> f64 {
    if universe == 0 {
        return 0.0;
    }
    recommended_len as f64 / universe as f64
}

/// Metrics at cutoff `k` for one user, or their mean over many users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RankingMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub hit_ratio: f64,
    pub coverage: f64,
}

impl RankingMetrics {
    /// Computes all metrics on the feature sets of `recommended` and
    /// `relevant`. Only the first `k` recommended items are considered.
    pub fn at_k(
        recommended: &[ItemId],
        relevant: &[ItemId],
        catalog: &FeatureCatalog,
        k: usize,
    ) -> Self {
        let top = &recommended[..recommended.len().min(k)];
        let rec = catalog.feature_set(top);
        let rel = catalog.feature_set(relevant);
        let precision = precision_at_k(&rec, &rel, k);
        let recall = recall_at_k(&rec, &rel);
        Self {
            precision,
            recall,
            f1: f1_score(precision, recall),
            hit_ratio: hit_ratio(&rec, &rel),
            coverage: coverage(rec.len(), catalog.universe_size()),
        }
    }

    /// Component-wise mean; all zeros for an empty slice.
    pub fn mean(samples: &[RankingMetrics]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }
        let mut total = Self::default();
        for s in samples {
            total += *s;
        }
        let n = samples.len() as f64;
        Self {
            precision: total.precision / n,
            recall: total.recall / n,
            f1: total.f1 / n,
            hit_ratio: total.hit_ratio / n,
            coverage: total.coverage / n,
        }
    }
}

impl AddAssign for RankingMetrics {
    fn add_assign(&mut self, rhs: Self) {
        self.precision += rhs.precision;
        self.recall += rhs.recall;
        self.f1 += rhs.f1;
        self.hit_ratio += rhs.hit_ratio;
        self.coverage += rhs.coverage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(v: &[&'static str]) -> HashSet<&'static str> {
        v.iter().copied().collect()
    }

    #[test]
    fn test_precision_recall() {
        let rec = set(&["a", "b", "c"]);
        let rel = set(&["b", "c", "d", "e"]);
        assert!((precision_at_k(&rec, &rel, 5) - 0.4).abs() < 1e-12);
        assert!((recall_at_k(&rec, &rel) - 0.5).abs() < 1e-12);
        assert_eq!(precision_at_k(&rec, &rel, 0), 0.0);
    }

    #[test]
    fn test_recall_empty_relevant() {
        assert_eq!(recall_at_k(&set(&["a"]), &set(&[])), 0.0);
    }

    #[test]
    fn test_f1_zero_precision_nonzero_recall() {
        assert_eq!(f1_score(0.0, 0.5), 0.0);
        assert_eq!(f1_score(0.0, 0.0), 0.0);
        assert!((f1_score(0.5, 0.5) - 0.5).abs() < 1e-12);
        let (p, r) = (0.2, 0.8);
        assert!((f1_score(p, r) - 2.0 * p * r / (p + r)).abs() < 1e-12);
    }

    #[test]
    fn test_hit_ratio_and_coverage() {
        assert_eq!(hit_ratio(&set(&["a"]), &set(&["a", "b"])), 1.0);
        assert_eq!(hit_ratio(&set(&["a"]), &set(&["b"])), 0.0);
        assert_eq!(coverage(3, 12), 0.25);
        assert_eq!(coverage(3, 0), 0.0);
    }

    #[test]
    fn test_at_k_maps_through_features() {
        let mut catalog = FeatureCatalog::new();
        catalog.insert(ItemId(1), ["comedy"]);
        catalog.insert(ItemId(2), ["comedy", "pets"]);
        catalog.insert(ItemId(3), ["sports"]);
        catalog.insert(ItemId(4), ["news"]);
        // different items, shared "comedy" tag
        let m = RankingMetrics::at_k(&[ItemId(1), ItemId(3)], &[ItemId(2)], &catalog, 2);
        assert!((m.precision - 0.5).abs() < 1e-12);
        assert!((m.recall - 0.5).abs() < 1e-12);
        assert!((m.f1 - 0.5).abs() < 1e-12);
        assert_eq!(m.hit_ratio, 1.0);
        assert!((m.coverage - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_at_k_truncates_recommendations() {
        let mut catalog = FeatureCatalog::new();
        catalog.insert(ItemId(1), ["a"]);
        catalog.insert(ItemId(2), ["b"]);
        let m = RankingMetrics::at_k(&[ItemId(1), ItemId(2)], &[ItemId(2)], &catalog, 1);
        assert_eq!(m.hit_ratio, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn test_mean() {
        let a = RankingMetrics {
            precision: 1.0,
            recall: 0.5,
            f1: 0.6,
            hit_ratio: 1.0,
            coverage: 0.2,
        };
        let m = RankingMetrics::mean(&[a, RankingMetrics::default()]);
        assert_eq!(m.precision, 0.5);
        assert_eq!(m.hit_ratio, 0.5);
        assert_eq!(RankingMetrics::mean(&[]), RankingMetrics::default());
    }
}
