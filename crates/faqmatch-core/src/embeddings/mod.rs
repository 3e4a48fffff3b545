//! Semantic Embeddings Module
//!
//! Provides local sentence embeddings using fastembed (ONNX-based).
//! No external API calls required - 100% local and private.
//!
//! Supports:
//! - The [`Embedder`] capability the matcher is written against
//! - Text embedding generation (384-dimensional vectors via all-MiniLM-L6-v2)
//! - Cosine similarity computation
//! - Batch embedding for corpus indexing
//! - LRU caching of query embeddings

mod cache;
mod embedder;
#[cfg(feature = "embeddings")]
mod local;

pub use cache::{CachedEmbedder, DEFAULT_QUERY_CACHE_SIZE};
pub use embedder::{
    cosine_similarity, truncate_text, Embedder, Embedding, EmbeddingError, BATCH_SIZE,
    MAX_TEXT_LENGTH,
};

#[cfg(feature = "embeddings")]
#[cfg_attr(docsrs, doc(cfg(feature = "embeddings")))]
pub use local::{FastEmbedder, DEFAULT_EMBEDDING_MODEL};
