//! Matcher Module
//!
//! Semantic question matching:
//! - Embedding index aligned with the corpus
//! - Exhaustive cosine scan with first-index tie-breaking
//! - Threshold decision between an answer and the fallback
//! - Startup wiring from configuration

mod index;
mod semantic;
mod startup;

pub use index::{BestMatch, EmbeddingIndex, IndexError};
pub use semantic::{
    respond, InitError, MatchError, MatchResult, MatcherHandle, SemanticMatcher,
    DEFAULT_THRESHOLD, FALLBACK_RESPONSE,
};

pub use startup::initialize_with_embedder;

#[cfg(feature = "embeddings")]
#[cfg_attr(docsrs, doc(cfg(feature = "embeddings")))]
pub use startup::initialize;
