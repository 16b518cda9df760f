//! TF-IDF vectoriser over item feature tags.
//!
//! Term weights are raw tag counts times a smoothed inverse document
//! frequency, `ln((1 + n) / (1 + df)) + 1`, and every item vector is scaled
//! to unit L2 norm. With unit rows the linear kernel equals cosine.

use crate::dataset::{FeatureCatalog, ItemId};
use crate::similarity::sparse::SparseVector;
use std::collections::HashMap;

/// Fitted TF-IDF model: vocabulary, IDF weights and one vector per item.
#[derive(Debug, Default, Clone)]
pub struct TfidfModel {
    /// term → column index
    vocabulary: HashMap<String, u32>,
    /// column index → idf weight
    idf: Vec<f32>,
    /// items in catalog order (ascending id)
    items: Vec<ItemId>,
    vectors: HashMap<ItemId, SparseVector>,
}

impl TfidfModel {
    /// Fits the vocabulary and IDF weights on `catalog` and vectorises every item.
    pub fn fit(catalog: &FeatureCatalog) -> Self {
        let items = catalog.items();
        let n_docs = items.len() as f32;

        let mut vocabulary: HashMap<String, u32> = HashMap::new();
        let mut doc_freq: Vec<u32> = Vec::new();
        for &item in &items {
            // catalog tags are already unique per item
            for tag in catalog.features(item) {
                let next = vocabulary.len() as u32;
                let col = *vocabulary.entry(tag.clone()).or_insert(next);
                if col as usize == doc_freq.len() {
                    doc_freq.push(0);
                }
                doc_freq[col as usize] += 1;
            }
        }

        let idf: Vec<f32> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f32)).ln() + 1.0)
            .collect();

        let mut vectors = HashMap::with_capacity(items.len());
        for &item in &items {
            let pairs: Vec<(u32, f32)> = catalog
                .features(item)
                .iter()
                .filter_map(|tag| vocabulary.get(tag.as_str()))
                .map(|&col| (col, idf[col as usize]))
                .collect();
            let mut vector = SparseVector::from_pairs(pairs);
            vector.normalize();
            vectors.insert(item, vector);
        }

        tracing::debug!(
            "Fitted TF-IDF over {} items, vocabulary size {}",
            items.len(),
            vocabulary.len()
        );

        Self {
            vocabulary,
            idf,
            items,
            vectors,
        }
    }

    /// Unit-norm TF-IDF vector of `item`, if it is in the fitted catalog.
    pub fn vector(&self, item: ItemId) -> Option<&SparseVector> {
        self.vectors.get(&item)
    }

    pub fn idf(&self, term: &str) -> Option<f32> {
        self.vocabulary.get(term).map(|&col| self.idf[col as usize])
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Item vectors in ascending item order.
    pub fn into_vectors(mut self) -> Vec<(ItemId, SparseVector)> {
        self.items
            .iter()
            .filter_map(|item| self.vectors.remove(item).map(|v| (*item, v)))
            .collect()
    }
}
