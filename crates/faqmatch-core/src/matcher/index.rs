//! In-memory embedding index
//!
//! One vector per corpus entry, positionally aligned with the corpus.
//! Search is an exhaustive cosine scan: FAQ corpora are small enough that an
//! approximate index would only add nondeterminism to tie-breaking.

use crate::embeddings::{cosine_similarity, Embedding};

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Index construction errors
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    /// A vector's dimension differs from the first vector's
    #[error("Invalid dimensions at entry {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },
    /// The embedder returned a different number of vectors than questions
    #[error("Embedder returned {got} vectors for {expected} questions")]
    LengthMismatch { expected: usize, got: usize },
}

// ============================================================================
// BEST MATCH
// ============================================================================

/// Position and score of the most similar corpus entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Index into the corpus
    pub index: usize,
    /// Cosine similarity in `[-1, 1]`
    pub score: f32,
}

// ============================================================================
// EMBEDDING INDEX
// ============================================================================

/// Read-only matrix of corpus embeddings
#[derive(Debug, Clone, Default)]
pub struct EmbeddingIndex {
    vectors: Vec<Embedding>,
    dimensions: usize,
}

impl EmbeddingIndex {
    /// Build an index, checking that all vectors share one dimension
    pub fn new(vectors: Vec<Embedding>) -> Result<Self, IndexError> {
        let dimensions = vectors.first().map(|v| v.dimensions).unwrap_or(0);

        if let Some((index, bad)) = vectors
            .iter()
            .enumerate()
            .find(|(_, v)| v.dimensions != dimensions)
        {
            return Err(IndexError::DimensionMismatch {
                index,
                expected: dimensions,
                got: bad.dimensions,
            });
        }

        Ok(Self {
            vectors,
            dimensions,
        })
    }

    /// Get the number of vectors in the index
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Vector dimensions (0 for an empty index)
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Find the entry most similar to `query`.
    ///
    /// Returns `None` for an empty index. Equal scores resolve to the lowest
    /// index.
    pub fn best_match(&self, query: &[f32]) -> Option<BestMatch> {
        let mut best: Option<BestMatch> = None;

        for (index, embedding) in self.vectors.iter().enumerate() {
            let score = cosine_similarity(query, &embedding.vector);
            // strict `>` keeps the first of equal scores
            if best.is_none_or(|b| score > b.score) {
                best = Some(BestMatch { index, score });
            }
        }

        best
    }
}

// ============================================================================
// TESTS
// ============================================================================
