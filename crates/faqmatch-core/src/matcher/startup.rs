//! Process startup: corpus load, embedder setup, index build

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::info;

use super::semantic::{InitError, MatcherHandle, SemanticMatcher};
use crate::config::MatcherConfig;
use crate::corpus::CorpusLoader;
use crate::embeddings::{CachedEmbedder, Embedder};

/// Build a matcher from `config` around an already-constructed embedder.
///
/// The corpus load never fails; only the embedder can make this an error.
/// When `query_cache_size` is non-zero the embedder is wrapped in a
/// [`CachedEmbedder`].
pub fn initialize_with_embedder<E>(
    config: &MatcherConfig,
    embedder: E,
) -> Result<MatcherHandle, InitError>
where
    E: Embedder + 'static,
{
    let report = CorpusLoader::with_extension(config.corpus_extension.as_str())
        .load_with_report(&config.corpus_dir);

    let embedder: Arc<dyn Embedder> = match NonZeroUsize::new(config.query_cache_size) {
        Some(capacity) => Arc::new(CachedEmbedder::new(embedder, capacity)),
        None => Arc::new(embedder),
    };

    let matcher = SemanticMatcher::build(report.corpus, embedder)?.with_threshold(config.threshold);

    info!(
        entries = matcher.len(),
        threshold = matcher.threshold(),
        model = matcher.model_name(),
        "Semantic matcher ready"
    );

    Ok(Arc::new(matcher))
}

/// Load the configured fastembed model and build a matcher.
///
/// Fails only when the model cannot be loaded or cannot embed the corpus;
/// an empty or partially invalid corpus still yields a working matcher.
#[cfg(feature = "embeddings")]
pub fn initialize(config: &MatcherConfig) -> Result<MatcherHandle, InitError> {
    use crate::embeddings::FastEmbedder;

    let cache_dir = config.model_cache_dir.clone();
    let embedder = match config.model.as_deref() {
        Some(code) => FastEmbedder::from_model_code(code, cache_dir)?,
        None => FastEmbedder::new(cache_dir)?,
    };

    initialize_with_embedder(config, embedder)
}
