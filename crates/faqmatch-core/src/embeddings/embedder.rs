//! Embedding capability
//!
//! The matcher never talks to a model directly. Everything that turns text
//! into vectors goes through [`Embedder`], so the matching logic can run
//! against deterministic stubs as easily as against the ONNX model.

use std::sync::Arc;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Maximum text length in bytes handed to a model (truncated if longer)
pub const MAX_TEXT_LENGTH: usize = 8192;

/// Batch size for efficient embedding generation
pub const BATCH_SIZE: usize = 32;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Embedding error types
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmbeddingError {
    /// Failed to initialize the embedding model
    #[error("Model initialization failed: {0}")]
    ModelInit(String),
    /// Failed to generate embedding
    #[error("Embedding generation failed: {0}")]
    EmbeddingFailed(String),
}

// ============================================================================
// EMBEDDING TYPE
// ============================================================================

/// A semantic embedding vector
#[derive(Debug, Clone, PartialEq)]
pub struct Embedding {
    /// The embedding vector
    pub vector: Vec<f32>,
    /// Dimensions of the vector
    pub dimensions: usize,
}

impl Embedding {
    /// Create a new embedding from a vector
    pub fn new(vector: Vec<f32>) -> Self {
        let dimensions = vector.len();
        Self { vector, dimensions }
    }

    /// Compute cosine similarity with another embedding
    pub fn cosine_similarity(&self, other: &Embedding) -> f32 {
        if self.dimensions != other.dimensions {
            return 0.0;
        }
        cosine_similarity(&self.vector, &other.vector)
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(vector: Vec<f32>) -> Self {
        Self::new(vector)
    }
}

// ============================================================================
// EMBEDDER TRAIT
// ============================================================================

/// Turns text into embedding vectors.
///
/// Implementations must be shareable across threads: the matcher holds an
/// `Arc<dyn Embedder>` and may be queried concurrently. Models that are not
/// thread-safe serialize access internally (see `FastEmbedder`).
pub trait Embedder: Send + Sync {
    /// Human-readable model identifier, used in logs and health output
    fn model_name(&self) -> &str;

    /// Generate the embedding for a single text
    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError>;

    /// Generate embeddings for several texts, one per input, in input order
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }
}

impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn model_name(&self) -> &str {
        (**self).model_name()
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        (**self).embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        (**self).embed_batch(texts)
    }
}

// ============================================================================
// SIMILARITY FUNCTIONS
// ============================================================================

/// Compute cosine similarity between two vectors
///
/// Returns 0.0 for mismatched lengths, a zero-norm side, or a NaN result.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let mut dot_product = 0.0_f32;
    let mut norm_a = 0.0_f32;
    let mut norm_b = 0.0_f32;

    for (x, y) in a.iter().zip(b.iter()) {
        dot_product += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator > 0.0 {
        let similarity = dot_product / denominator;
        if similarity.is_nan() { 0.0 } else { similarity }
    } else {
        0.0
    }
}

/// Truncate text to at most [`MAX_TEXT_LENGTH`] bytes on a char boundary
pub fn truncate_text(text: &str) -> &str {
    if text.len() <= MAX_TEXT_LENGTH {
        return text;
    }
    let mut end = MAX_TEXT_LENGTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

// ============================================================================
// TESTS
// ============================================================================
