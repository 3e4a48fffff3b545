//! Stub Embedders
//!
//! Deterministic embedders that stand in for the sentence model so tests
//! can reason about exact similarity scores.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use faqmatch_core::{Embedder, Embedding, EmbeddingError};

// ============================================================================
// CONCEPT EMBEDDER
// ============================================================================

/// Concept vocabulary: each word votes for one dimension.
const CONCEPTS: &[&[&str]] = &[
    // refunds and returns
    &["return", "returns", "refund", "refunds", "money", "back", "policy"],
    // accounts and passwords
    &["password", "reset", "login", "account", "sign"],
    // shipping
    &["ship", "shipping", "delivery", "deliver", "track", "order"],
    // payment
    &["pay", "payment", "card", "invoice", "billing"],
    // geography (never in the support corpus)
    &["capital", "france", "country", "city"],
];

/// Bag-of-concepts embedder.
///
/// Paraphrases that share concept words land on the same axis, so
/// "How can I get my money back?" and "What is your return policy?" are
/// identical (similarity 1.0) while unrelated questions score 0.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConceptEmbedder;

impl ConceptEmbedder {
    /// Number of dimensions
    pub fn dimensions() -> usize {
        CONCEPTS.len()
    }
}

impl Embedder for ConceptEmbedder {
    fn model_name(&self) -> &str {
        "concept-stub"
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut vector = vec![0.0_f32; CONCEPTS.len()];
        let lower = text.to_lowercase();

        for word in lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
            if let Some(dim) = CONCEPTS.iter().position(|words| words.contains(&word)) {
                vector[dim] += 1.0;
            }
        }

        Ok(Embedding::new(vector))
    }
}

// ============================================================================
// FIXED EMBEDDER
// ============================================================================

/// Maps exact texts to hand-picked vectors; anything else gets the fallback
#[derive(Debug, Clone)]
pub struct FixedEmbedder {
    vectors: HashMap<String, Vec<f32>>,
    fallback: Vec<f32>,
}

impl FixedEmbedder {
    pub fn new(fallback: Vec<f32>) -> Self {
        Self {
            vectors: HashMap::new(),
            fallback,
        }
    }

    /// Register the vector for `text`
    pub fn with(mut self, text: &str, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.to_string(), vector);
        self
    }
}

impl Embedder for FixedEmbedder {
    fn model_name(&self) -> &str {
        "fixed-stub"
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let vector = self.vectors.get(text).unwrap_or(&self.fallback);
        Ok(Embedding::new(vector.clone()))
    }
}

// ============================================================================
// COUNTING EMBEDDER
// ============================================================================

/// Wraps another embedder and counts single and batch calls
#[derive(Debug, Default)]
pub struct CountingEmbedder<E> {
    inner: E,
    embed_calls: AtomicUsize,
    batch_calls: AtomicUsize,
}

impl<E: Embedder> CountingEmbedder<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            embed_calls: AtomicUsize::new(0),
            batch_calls: AtomicUsize::new(0),
        }
    }

    pub fn embed_calls(&self) -> usize {
        self.embed_calls.load(Ordering::SeqCst)
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }
}

impl<E: Embedder> Embedder for CountingEmbedder<E> {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed(text)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_batch(texts)
    }
}

// ============================================================================
// FAILING EMBEDDER
// ============================================================================

/// Embedder whose model never loaded
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn model_name(&self) -> &str {
        "failing-stub"
    }

    fn embed(&self, _text: &str) -> Result<Embedding, EmbeddingError> {
        Err(EmbeddingError::ModelInit("model files missing".to_string()))
    }
}
