//! Similarity indices.
//!
//! Both signals of the hybrid scorer are read from dense, symmetric
//! [`SimilarityMatrix`] instances: a user × user matrix over engagement
//! vectors and an item × item matrix over TF-IDF feature vectors. Matrices are
//! quadratic in memory, so the user base and catalog size are bounded by RAM.

/// Builders turning interactions and feature tags into similarity matrices.
pub mod builders;
/// Similarity kernels: cosine and linear (dot product).
pub mod kernel;
/// Dense symmetric similarity matrix with a key index.
pub mod matrix;
/// Sparse f32 vectors with sorted indices.
pub mod sparse;
/// TF-IDF vectoriser over item feature tags.
pub mod tfidf;

pub use builders::{item_similarity, user_similarity};
pub use kernel::SimilarityKernel;
pub use matrix::SimilarityMatrix;
pub use sparse::SparseVector;
pub use tfidf::TfidfModel;
