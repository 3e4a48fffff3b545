//! Test Corpus Directory
//!
//! Provides isolated corpus directories for testing:
//! - Temporary directories that are automatically cleaned up
//! - Helpers for writing well-formed, malformed and raw corpus files
//! - One-call matcher construction over the directory

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use faqmatch_core::{Corpus, CorpusLoader, Embedder, LoadReport, SemanticMatcher};
use serde_json::Value;
use tempfile::TempDir;

/// Temporary corpus directory
///
/// Each test gets its own directory; it is deleted when the value is dropped.
///
/// # Example
///
/// ```rust,ignore
/// let dir = TestCorpusDir::new();
/// dir.write_records("faq.txt", &json!([{"question": "Q", "answer": "A"}]));
/// dir.write_raw("broken.txt", "[{");
///
/// let corpus = dir.load();
/// ```
pub struct TestCorpusDir {
    temp_dir: TempDir,
}

impl Default for TestCorpusDir {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCorpusDir {
    /// Create an empty corpus directory
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Path of the directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a JSON value to `name`
    pub fn write_records(&self, name: &str, records: &Value) -> PathBuf {
        let contents = serde_json::to_string_pretty(records).expect("Failed to serialize records");
        self.write_raw(name, &contents)
    }

    /// Write arbitrary text to `name`
    pub fn write_raw(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write corpus file");
        path
    }

    /// Load with the default `*.txt` loader
    pub fn load(&self) -> Corpus {
        CorpusLoader::new().load(self.path())
    }

    /// Load with the default loader and keep the report
    pub fn load_report(&self) -> LoadReport {
        CorpusLoader::new().load_with_report(self.path())
    }

    /// Load the directory and build a matcher around `embedder`
    pub fn matcher<E: Embedder + 'static>(&self, embedder: E) -> SemanticMatcher {
        SemanticMatcher::build(self.load(), Arc::new(embedder)).expect("Failed to build matcher")
    }
}
