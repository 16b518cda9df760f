//! Builders for the two similarity indices consumed by the hybrid scorer.

use crate::dataset::{FeatureCatalog, InteractionTable, ItemId, UserId};
use crate::similarity::kernel::SimilarityKernel;
use crate::similarity::matrix::SimilarityMatrix;
use crate::similarity::sparse::SparseVector;
use crate::similarity::tfidf::TfidfModel;
use std::collections::HashMap;

/// User × user similarity over engagement vectors.
///
/// Each user is a sparse vector over all items holding engagement ratios;
/// items the user never watched are implicit zeros. Rows are in ascending
/// user id order.
pub fn user_similarity(
    interactions: &InteractionTable,
    kernel: SimilarityKernel,
) -> SimilarityMatrix<UserId> {
    let columns: HashMap<ItemId, u32> = interactions
        .items()
        .into_iter()
        .enumerate()
        .map(|(col, item)| (item, col as u32))
        .collect();

    let entries: Vec<(UserId, SparseVector)> = interactions
        .users()
        .into_iter()
        .map(|user| {
            let pairs: Vec<(u32, f32)> = interactions
                .user_rows(user)
                .map(|row| (columns[&row.item_id], row.engagement_ratio))
                .collect();
            (user, SparseVector::from_pairs(pairs))
        })
        .collect();

    SimilarityMatrix::from_vectors("user", entries, kernel)
}

/// Item × item similarity over TF-IDF feature vectors, ascending item order.
pub fn item_similarity(
    catalog: &FeatureCatalog,
    kernel: SimilarityKernel,
) -> SimilarityMatrix<ItemId> {
    let entries = TfidfModel::fit(catalog).into_vectors();
    SimilarityMatrix::from_vectors("item", entries, kernel)
}
