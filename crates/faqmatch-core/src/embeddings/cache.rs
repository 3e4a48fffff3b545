//! Query embedding cache
//!
//! Wraps any [`Embedder`] with an LRU cache keyed by the exact query text.
//! Repeated questions (the common case for a FAQ bot) skip the model call.
//! Batch calls are passed straight through: they only happen once, when the
//! corpus index is built.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use lru::LruCache;

use super::embedder::{Embedder, Embedding, EmbeddingError};

/// Default number of cached query embeddings
pub const DEFAULT_QUERY_CACHE_SIZE: usize = 256;

/// LRU-caching decorator around an embedder
pub struct CachedEmbedder<E> {
    inner: E,
    cache: Mutex<LruCache<String, Embedding>>,
}

impl<E: Embedder> CachedEmbedder<E> {
    /// Wrap `inner` with a cache holding up to `capacity` query embeddings
    pub fn new(inner: E, capacity: NonZeroUsize) -> Self {
        Self {
            inner,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// The wrapped embedder
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of cached embeddings
    pub fn len(&self) -> usize {
        self.cache.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn model_name(&self) -> &str {
        self.inner.model_name()
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        // A poisoned cache is bypassed, never fatal
        if let Ok(mut cache) = self.cache.lock() {
            if let Some(hit) = cache.get(text) {
                return Ok(hit.clone());
            }
        }

        let embedding = self.inner.embed(text)?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(text.to_string(), embedding.clone());
        }

        Ok(embedding)
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        self.inner.embed_batch(texts)
    }
}
