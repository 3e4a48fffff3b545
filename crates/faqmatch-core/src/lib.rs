//! # faqmatch Core
//!
//! Semantic FAQ matching engine. Answers free-text questions by finding the
//! closest known question in a fixed corpus:
//!
//! - **Corpus Loader**: directory of JSON record files, `question`/`answer`
//!   and `Question`/`Answer` schemas, per-file skip-and-report recovery
//! - **Sentence Embeddings**: local fastembed (all-MiniLM-L6-v2, 384 dimensions)
//! - **Semantic Matcher**: cosine similarity against every corpus question,
//!   first-index tie-breaking, strict threshold (default 0.5)
//!
//! The matcher is an immutable context built once at startup and shared as a
//! [`MatcherHandle`]. The embedding model is injected through the
//! [`Embedder`] trait, so the matching logic can be exercised with
//! deterministic stubs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use faqmatch_core::{initialize, respond, MatcherConfig};
//!
//! let config = MatcherConfig::from_env()?.with_corpus_dir("extracted_faqs");
//! let handle = initialize(&config)?;
//!
//! let answer = respond(&handle, "How can I get my money back?");
//! ```
//!
//! ## Feature Flags
//!
//! - `embeddings` (default): Enable local embedding generation with fastembed

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(rustdoc::missing_crate_level_docs)]

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod corpus;
pub mod embeddings;
pub mod matcher;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Configuration
pub use config::{ConfigError, MatcherConfig};

// Corpus
pub use corpus::{load, Corpus, CorpusLoader, FaqEntry, LoadReport, SkipReason, SkippedFile};

// Embeddings
pub use embeddings::{cosine_similarity, CachedEmbedder, Embedder, Embedding, EmbeddingError};

#[cfg(feature = "embeddings")]
pub use embeddings::FastEmbedder;

// Matcher
pub use matcher::{
    initialize_with_embedder, respond, BestMatch, EmbeddingIndex, IndexError, InitError,
    MatchError, MatchResult, MatcherHandle, SemanticMatcher, DEFAULT_THRESHOLD, FALLBACK_RESPONSE,
};

#[cfg(feature = "embeddings")]
pub use matcher::initialize;
