//! Dense symmetric similarity matrix.
//!
//! Values are stored row-major in one contiguous `Vec<f32>` of `n * n`
//! entries. Only the upper triangle is computed; the lower triangle is a
//! mirror, so `get(a, b) == get(b, a)` holds bit for bit.

use crate::error::{RecError, Result};
use crate::similarity::kernel::SimilarityKernel;
use crate::similarity::sparse::SparseVector;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct SimilarityMatrix<K> {
    /// Label used in `NotFound` errors ("user", "item").
    kind: &'static str,
    /// row index → key
    keys: Vec<K>,
    /// key → row index
    positions: HashMap<K, usize>,
    values: Vec<f32>,
}

impl<K> SimilarityMatrix<K>
where
    K: Copy + Eq + Hash + Display,
{
    /// Computes pairwise similarities between `entries`.
    ///
    /// Row order follows `entries`. A key that appears more than once keeps
    /// its first vector; later ones are ignored.
    pub fn from_vectors(
        kind: &'static str,
        entries: Vec<(K, SparseVector)>,
        kernel: SimilarityKernel,
    ) -> Self {
        let mut keys = Vec::with_capacity(entries.len());
        let mut positions = HashMap::with_capacity(entries.len());
        let mut vectors = Vec::with_capacity(entries.len());
        for (key, vector) in entries {
            if positions.contains_key(&key) {
                tracing::warn!("Duplicate {} {} ignored in similarity matrix", kind, key);
                continue;
            }
            positions.insert(key, keys.len());
            keys.push(key);
            vectors.push(vector);
        }

        let n = keys.len();
        let norms: Vec<f32> = vectors.iter().map(SparseVector::norm).collect();
        let mut values = vec![0.0f32; n * n];
        for i in 0..n {
            for j in i..n {
                let s = kernel.similarity_prenorm(&vectors[i], &vectors[j], norms[i], norms[j]);
                values[i * n + j] = s;
                values[j * n + i] = s;
            }
        }

        tracing::info!(
            "Built {n}x{n} {kind} similarity matrix ({kernel}, {} KiB)",
            n * n * std::mem::size_of::<f32>() / 1024
        );

        Self {
            kind,
            keys,
            positions,
            values,
        }
    }

    fn position(&self, key: K) -> Result<usize> {
        self.positions
            .get(&key)
            .copied()
            .ok_or_else(|| RecError::not_found(self.kind, key))
    }

    /// Similarity between `a` and `b`.
    pub fn get(&self, a: K, b: K) -> Result<f32> {
        let (i, j) = (self.position(a)?, self.position(b)?);
        Ok(self.values[i * self.keys.len() + j])
    }

    /// Full row of `key`, aligned with [`keys`](Self::keys).
    pub fn row(&self, key: K) -> Result<&[f32]> {
        let n = self.keys.len();
        let i = self.position(key)?;
        Ok(&self.values[i * n..(i + 1) * n])
    }

    /// The `n` keys most similar to `key`, excluding `key` itself, by
    /// descending similarity. Equal similarities keep row order.
    pub fn most_similar(&self, key: K, n: usize) -> Result<Vec<(K, f32)>> {
        let i = self.position(key)?;
        let row = self.row(key)?;
        let mut ranked: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .collect();
        ranked.sort_by_key(|&(_, sim)| Reverse(OrderedFloat(sim)));
        ranked.truncate(n);
        Ok(ranked
            .into_iter()
            .map(|(j, s)| (self.keys[j], s))
            .collect())
    }

    /// Whether `key` has a row in the matrix.
    pub fn contains(&self, key: K) -> bool {
        self.positions.contains_key(&key)
    }

    /// Keys in row order.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
