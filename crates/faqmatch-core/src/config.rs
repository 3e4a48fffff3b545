//! Matcher configuration
//!
//! Everything is read from environment variables, with CLI flags in the
//! binaries layered on top. [`MatcherConfig::from_lookup`] takes the lookup
//! as a closure so tests never touch the process environment.

use std::path::PathBuf;

use crate::corpus::DEFAULT_CORPUS_EXTENSION;
use crate::embeddings::DEFAULT_QUERY_CACHE_SIZE;
use crate::matcher::DEFAULT_THRESHOLD;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Corpus directory used when none is configured
pub const DEFAULT_CORPUS_DIR: &str = "extracted_faqs";

/// Corpus directory
pub const ENV_CORPUS_DIR: &str = "FAQMATCH_CORPUS_DIR";
/// Corpus file extension, with or without the leading dot
pub const ENV_CORPUS_EXTENSION: &str = "FAQMATCH_CORPUS_EXTENSION";
/// Match threshold, a number in [-1, 1]
pub const ENV_THRESHOLD: &str = "FAQMATCH_THRESHOLD";
/// Query embedding cache capacity (0 disables)
pub const ENV_QUERY_CACHE_SIZE: &str = "FAQMATCH_QUERY_CACHE_SIZE";
/// fastembed model code
pub const ENV_EMBEDDING_MODEL: &str = "FAQMATCH_EMBEDDING_MODEL";
/// Model download directory, shared with fastembed
pub const ENV_MODEL_CACHE_PATH: &str = "FASTEMBED_CACHE_PATH";

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Configuration errors
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Threshold is not a finite number in [-1, 1]
    #[error("Invalid threshold '{0}': expected a number between -1 and 1")]
    InvalidThreshold(String),
    /// A numeric variable could not be parsed
    #[error("Invalid value for {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

// ============================================================================
// CONFIG
// ============================================================================

/// Settings for building a [`crate::SemanticMatcher`]
#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    /// Directory holding the corpus files
    pub corpus_dir: PathBuf,
    /// Extension of corpus files, without the dot
    pub corpus_extension: String,
    /// Similarity a match must exceed (scores at or below it are rejected)
    pub threshold: f32,
    /// Query embedding LRU capacity; 0 disables the cache
    pub query_cache_size: usize,
    /// fastembed model code; `None` selects all-MiniLM-L6-v2
    pub model: Option<String>,
    /// Where model files are downloaded and cached
    pub model_cache_dir: PathBuf,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_CORPUS_DIR),
            corpus_extension: DEFAULT_CORPUS_EXTENSION.to_string(),
            threshold: DEFAULT_THRESHOLD,
            query_cache_size: DEFAULT_QUERY_CACHE_SIZE,
            model: None,
            model_cache_dir: default_model_cache_dir(|_| None),
        }
    }
}

impl MatcherConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self {
            model_cache_dir: default_model_cache_dir(&get),
            ..Self::default()
        };

        if let Some(dir) = get(ENV_CORPUS_DIR) {
            config.corpus_dir = PathBuf::from(dir);
        }
        if let Some(extension) = get(ENV_CORPUS_EXTENSION) {
            config.corpus_extension = extension.trim().trim_start_matches('.').to_string();
        }
        if let Some(threshold) = get(ENV_THRESHOLD) {
            config.threshold = parse_threshold(&threshold)?;
        }
        if let Some(size) = get(ENV_QUERY_CACHE_SIZE) {
            config.query_cache_size =
                size.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        var: ENV_QUERY_CACHE_SIZE,
                        value: size.clone(),
                    })?;
        }
        config.model = get(ENV_EMBEDDING_MODEL).map(|m| m.trim().to_string());

        Ok(config)
    }

    /// Override the corpus directory
    pub fn with_corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = dir.into();
        self
    }

    /// Override the threshold, rejecting values outside [-1, 1]
    pub fn with_threshold(mut self, threshold: f32) -> Result<Self, ConfigError> {
        validate_threshold(threshold)?;
        self.threshold = threshold;
        Ok(self)
    }
}

/// Parse and validate a threshold value
pub fn parse_threshold(value: &str) -> Result<f32, ConfigError> {
    let threshold: f32 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidThreshold(value.to_string()))?;
    validate_threshold(threshold)?;
    Ok(threshold)
}

fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    if threshold.is_finite() && (-1.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold.to_string()))
    }
}

/// Get the default cache directory for fastembed models.
/// Uses FASTEMBED_CACHE_PATH, or falls back to the platform cache directory.
pub fn default_model_cache_dir<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(ENV_MODEL_CACHE_PATH) {
        return PathBuf::from(path);
    }

    // macOS: ~/Library/Caches/com.faqmatch.faqmatch/fastembed
    // Linux: ~/.cache/faqmatch/fastembed
    // Windows: %LOCALAPPDATA%\faqmatch\faqmatch\cache\fastembed
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "faqmatch", "faqmatch") {
        return proj_dirs.cache_dir().join("fastembed");
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return base_dirs.home_dir().join(".cache/faqmatch/fastembed");
    }

    PathBuf::from(".fastembed_cache")
}
