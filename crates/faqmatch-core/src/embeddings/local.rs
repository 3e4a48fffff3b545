//! Local Sentence Embeddings
//!
//! Uses fastembed v5 for local ONNX inference.
//!
//! ## Models
//!
//! - **Default**: all-MiniLM-L6-v2 (384d, sentence-transformers compatible)
//! - Any other fastembed text model can be selected by its model code,
//!   e.g. `FAQMATCH_EMBEDDING_MODEL=Qdrant/bge-small-en-v1.5-onnx-Q`.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, ModelTrait, TextEmbedding};

use super::embedder::{truncate_text, Embedder, Embedding, EmbeddingError, BATCH_SIZE};

/// Model used when no model code is configured
pub const DEFAULT_EMBEDDING_MODEL: EmbeddingModel = EmbeddingModel::AllMiniLML6V2;

// ============================================================================
// FASTEMBED EMBEDDER
// ============================================================================

/// Embedder backed by a fastembed `TextEmbedding` model.
///
/// fastembed's `embed` needs `&mut self`, so the model sits behind a single
/// `Mutex` and concurrent callers take turns.
pub struct FastEmbedder {
    model: Mutex<TextEmbedding>,
    model_name: String,
    dimensions: usize,
}

impl FastEmbedder {
    /// Load the default model, downloading it into `cache_dir` if necessary
    pub fn new(cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        Self::with_model(DEFAULT_EMBEDDING_MODEL, cache_dir)
    }

    /// Load a model by its fastembed model code
    pub fn from_model_code(code: &str, cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        let model = EmbeddingModel::from_str(code).map_err(|e| {
            EmbeddingError::ModelInit(format!("Unknown embedding model '{}': {}", code, e))
        })?;
        Self::with_model(model, cache_dir)
    }

    /// Load a specific fastembed model
    pub fn with_model(model: EmbeddingModel, cache_dir: PathBuf) -> Result<Self, EmbeddingError> {
        if let Err(e) = std::fs::create_dir_all(&cache_dir) {
            tracing::warn!("Failed to create cache directory {:?}: {}", cache_dir, e);
        }

        let model_name = model.to_string();
        let dimensions = EmbeddingModel::get_model_info(&model)
            .map(|info| info.dim)
            .ok_or_else(|| {
                EmbeddingError::ModelInit(format!("Model metadata missing for {}", model_name))
            })?;

        let options = InitOptions::new(model)
            .with_show_download_progress(true)
            .with_cache_dir(cache_dir);

        let text_embedding = TextEmbedding::try_new(options).map_err(|e| {
            EmbeddingError::ModelInit(format!(
                "Failed to initialize {} embedding model: {}. \
                Ensure ONNX runtime is available and model files can be downloaded.",
                model_name, e
            ))
        })?;

        tracing::info!(model = %model_name, dimensions, "Embedding model loaded");

        Ok(Self {
            model: Mutex::new(text_embedding),
            model_name,
            dimensions,
        })
    }

    /// Get the embedding dimensions reported by the model metadata
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn lock_model(&self) -> Result<std::sync::MutexGuard<'_, TextEmbedding>, EmbeddingError> {
        self.model
            .lock()
            .map_err(|e| EmbeddingError::ModelInit(format!("Lock poisoned: {}", e)))
    }
}

impl Embedder for FastEmbedder {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        let mut model = self.lock_model()?;

        let embeddings = model
            .embed(vec![truncate_text(text)], None)
            .map_err(|e| EmbeddingError::EmbeddingFailed(e.to_string()))?;

        embeddings
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| EmbeddingError::EmbeddingFailed("No embedding generated".to_string()))
    }

    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let mut model = self.lock_model()?;
        let mut all_embeddings = Vec::with_capacity(texts.len());

        // Process in batches for efficiency
        for chunk in texts.chunks(BATCH_SIZE) {
            let truncated: Vec<&str> = chunk.iter().map(|t| truncate_text(t)).collect();

            let embeddings = model
                .embed(truncated, None)
                .map_err(|e| EmbeddingError::EmbeddingFailed(e.to_string()))?;

            all_embeddings.extend(embeddings.into_iter().map(Embedding::new));
        }

        Ok(all_embeddings)
    }
}

// ============================================================================
// TESTS
// ============================================================================
