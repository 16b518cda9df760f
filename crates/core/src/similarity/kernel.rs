//! Similarity kernels.
//!
//! Unlike distances, all kernels here return a value where **higher is more
//! similar**.

use crate::similarity::sparse::SparseVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kernel used to compare two vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimilarityKernel {
    /// `dot(a, b) / (|a| |b|)`. Range: \[-1, 1\]; 0 if either vector is zero.
    Cosine,
    /// Raw dot product. Range: \[0, ∞) for non-negative vectors. Equal to
    /// cosine on L2-normalised inputs such as TF-IDF rows.
    Linear,
}

impl SimilarityKernel {
    pub fn similarity(&self, a: &SparseVector, b: &SparseVector) -> f32 {
        self.similarity_prenorm(a, b, a.norm(), b.norm())
    }

    /// Same as [`similarity`](Self::similarity) with precomputed L2 norms, used when
    /// filling a matrix so each norm is computed once per row.
    pub fn similarity_prenorm(
        &self,
        a: &SparseVector,
        b: &SparseVector,
        norm_a: f32,
        norm_b: f32,
    ) -> f32 {
        match self {
            SimilarityKernel::Cosine => {
                let denom = norm_a * norm_b;
                if denom <= f32::EPSILON {
                    0.0
                } else {
                    (a.dot(b) / denom).clamp(-1.0, 1.0)
                }
            }
            SimilarityKernel::Linear => a.dot(b),
        }
    }
}

impl fmt::Display for SimilarityKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimilarityKernel::Cosine => write!(f, "cosine"),
            SimilarityKernel::Linear => write!(f, "linear"),
        }
    }
}

impl FromStr for SimilarityKernel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(SimilarityKernel::Cosine),
            "linear" | "dot" => Ok(SimilarityKernel::Linear),
            other => Err(format!(
                "unknown kernel '{other}', expected 'cosine' or 'linear'"
            )),
        }
    }
}
