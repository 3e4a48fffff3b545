//! Semantic matcher
//!
//! Holds the corpus and its embedding index, both immutable after
//! [`SemanticMatcher::build`]. Queries are a pure read over that state plus
//! one call to the embedder, so a matcher can be shared across threads as a
//! [`MatcherHandle`] without any locking of its own.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::index::{BestMatch, EmbeddingIndex, IndexError};
use crate::corpus::Corpus;
use crate::embeddings::{Embedder, EmbeddingError};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Similarity a match must exceed. Scores at or below it yield no match.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Returned to the user whenever no answer is confident enough
pub const FALLBACK_RESPONSE: &str = "Sorry, I don't understand your question.";

// ============================================================================
// TYPES
// ============================================================================

/// Outcome of matching a query against the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// The answer of the best-matching entry
    Answer(String),
    /// Best similarity at or below the threshold, or an empty corpus
    NoMatch,
}

impl MatchResult {
    /// Render for the user: the answer, or the fixed fallback
    pub fn into_response(self) -> String {
        match self {
            MatchResult::Answer(text) => text,
            MatchResult::NoMatch => FALLBACK_RESPONSE.to_string(),
        }
    }
}

/// Query-time errors
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    /// The embedder failed on the query
    #[error(transparent)]
    Embedding(#[from] EmbeddingError),
    /// The query vector does not fit the index
    #[error("Query has {got} dimensions, index has {expected}")]
    QueryDimensions { expected: usize, got: usize },
}

/// Startup errors. Any of these means no service.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The embedding model could not be loaded or could not embed the corpus
    #[error("Embedding model unavailable: {0}")]
    Embedding(#[from] EmbeddingError),
    /// The embedder produced vectors that cannot form an index
    #[error("Failed to build embedding index: {0}")]
    Index(#[from] IndexError),
}

/// Shared, immutable matcher context
pub type MatcherHandle = Arc<SemanticMatcher>;

// ============================================================================
// SEMANTIC MATCHER
// ============================================================================

/// Nearest-question matcher over a fixed corpus
pub struct SemanticMatcher {
    corpus: Corpus,
    index: EmbeddingIndex,
    embedder: Arc<dyn Embedder>,
    threshold: f32,
}

impl std::fmt::Debug for SemanticMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SemanticMatcher")
            .field("entries", &self.corpus.len())
            .field("dimensions", &self.index.dimensions())
            .field("model", &self.embedder.model_name())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl SemanticMatcher {
    /// Embed every question in `corpus` and build the index.
    ///
    /// An empty corpus is valid and never touches the embedder.
    pub fn build(corpus: Corpus, embedder: Arc<dyn Embedder>) -> Result<Self, InitError> {
        let vectors = if corpus.is_empty() {
            Vec::new()
        } else {
            let questions: Vec<&str> = corpus.questions().collect();
            embedder.embed_batch(&questions)?
        };

        if vectors.len() != corpus.len() {
            return Err(IndexError::LengthMismatch {
                expected: corpus.len(),
                got: vectors.len(),
            }
            .into());
        }

        let index = EmbeddingIndex::new(vectors)?;

        info!(
            entries = corpus.len(),
            dimensions = index.dimensions(),
            model = embedder.model_name(),
            "Embedding index built"
        );

        Ok(Self {
            corpus,
            index,
            embedder,
            threshold: DEFAULT_THRESHOLD,
        })
    }

    /// Replace the match threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// The loaded corpus
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// The embedding index, aligned 1:1 with [`Self::corpus`]
    pub fn index(&self) -> &EmbeddingIndex {
        &self.index
    }

    /// Current match threshold
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Name of the embedding model
    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Number of corpus entries
    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    /// Check if the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }

    /// Find the most similar entry, without applying the threshold.
    ///
    /// An empty corpus returns `None` without embedding the query.
    pub fn best_match(&self, query: &str) -> Result<Option<BestMatch>, MatchError> {
        if self.index.is_empty() {
            return Ok(None);
        }

        let embedding = self.embedder.embed(query)?;
        if embedding.dimensions != self.index.dimensions() {
            return Err(MatchError::QueryDimensions {
                expected: self.index.dimensions(),
                got: embedding.dimensions,
            });
        }

        Ok(self.index.best_match(&embedding.vector))
    }

    /// Apply the threshold to a best-match candidate.
    ///
    /// Only a score strictly above the threshold answers; a score equal to it
    /// is no match.
    pub fn decide(&self, best: Option<BestMatch>) -> MatchResult {
        match best {
            Some(best) if best.score > self.threshold => self
                .corpus
                .get(best.index)
                .map(|entry| MatchResult::Answer(entry.answer.clone()))
                .unwrap_or(MatchResult::NoMatch),
            _ => MatchResult::NoMatch,
        }
    }

    /// Match a query against the corpus
    pub fn match_query(&self, query: &str) -> Result<MatchResult, MatchError> {
        let best = self.best_match(query)?;

        if let Some(b) = best {
            debug!(index = b.index, score = b.score, threshold = self.threshold, "Best match");
        }

        Ok(self.decide(best))
    }

    /// Answer a user question. Never fails: errors are logged and the user
    /// gets the fallback text.
    pub fn respond(&self, user_text: &str) -> String {
        match self.match_query(user_text) {
            Ok(result) => result.into_response(),
            Err(e) => {
                error!("Query failed: {}", e);
                FALLBACK_RESPONSE.to_string()
            }
        }
    }
}

/// Answer a user question through a shared matcher handle
pub fn respond(handle: &SemanticMatcher, user_text: &str) -> String {
    handle.respond(user_text)
}

// ============================================================================
// TESTS
// ============================================================================
