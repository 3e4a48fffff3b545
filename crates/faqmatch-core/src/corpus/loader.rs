//! Corpus directory loader
//!
//! Reads every corpus file in a directory (one level, no recursion), parses
//! each as a JSON array of records, and normalizes the records into
//! [`FaqEntry`] values. Files are visited in lexicographic file-name order so
//! the corpus, and with it tie-breaking, is stable across platforms.
//!
//! Failures are recovered per file: an unreadable or malformed file is
//! skipped with a warning and loading continues.

use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::entry::{normalize_record, Corpus, FaqEntry};

/// Extension of corpus files (without the dot)
pub const DEFAULT_CORPUS_EXTENSION: &str = "txt";

// ============================================================================
// LOAD REPORT
// ============================================================================

/// Why a corpus file contributed no entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The file could not be read (I/O error, invalid UTF-8)
    Unreadable(String),
    /// The contents are not valid JSON
    InvalidJson(String),
    /// Valid JSON, but the top level is not an array
    NotAnArray,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "unreadable: {}", e),
            SkipReason::InvalidJson(e) => write!(f, "invalid JSON: {}", e),
            SkipReason::NotAnArray => write!(f, "top-level JSON value is not an array"),
        }
    }
}

/// A corpus file that was skipped during loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Outcome of loading a corpus directory
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Accepted entries in file order, then record order
    pub corpus: Corpus,
    /// Corpus files that parsed successfully
    pub files_read: usize,
    /// Corpus files that were skipped, in visiting order
    pub skipped: Vec<SkippedFile>,
    /// Records that matched no accepted schema
    pub records_dropped: usize,
}

// ============================================================================
// LOADER
// ============================================================================

/// Loads FAQ corpora from directories of JSON record files
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    extension: String,
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CorpusLoader {
    /// Create a loader reading `*.txt` files
    pub fn new() -> Self {
        Self::with_extension(DEFAULT_CORPUS_EXTENSION)
    }

    /// Create a loader reading files with the given extension (no leading dot)
    pub fn with_extension(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let extension = extension.trim_start_matches('.').to_string();
        Self { extension }
    }

    /// The corpus file extension this loader reads
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Load the corpus, discarding the diagnostics
    pub fn load(&self, directory: &Path) -> Corpus {
        self.load_with_report(directory).corpus
    }

    /// Load the corpus and report what was skipped or dropped.
    ///
    /// Never fails: a missing or unreadable directory yields an empty corpus.
    pub fn load_with_report(&self, directory: &Path) -> LoadReport {
        let files = match self.corpus_files(directory) {
            Ok(files) => files,
            Err(e) => {
                error!("Failed to read corpus directory {:?}: {}", directory, e);
                return LoadReport::default();
            }
        };

        let mut entries: Vec<FaqEntry> = Vec::new();
        let mut report = LoadReport::default();

        for path in files {
            match read_corpus_file(&path) {
                Ok(records) => {
                    let before = entries.len();
                    for record in &records {
                        match normalize_record(record) {
                            Some(entry) => entries.push(entry),
                            None => report.records_dropped += 1,
                        }
                    }
                    report.files_read += 1;
                    debug!(
                        file = %path.display(),
                        records = records.len(),
                        accepted = entries.len() - before,
                        "Corpus file loaded"
                    );
                }
                Err(reason) => {
                    warn!("Skipping corpus file {}: {}", path.display(), reason);
                    report.skipped.push(SkippedFile { path, reason });
                }
            }
        }

        report.corpus = Corpus::new(entries);

        info!(
            directory = %directory.display(),
            entries = report.corpus.len(),
            files_read = report.files_read,
            files_skipped = report.skipped.len(),
            records_dropped = report.records_dropped,
            "Corpus loaded"
        );

        report
    }

    /// Regular files in `directory` with the corpus extension, sorted by file name
    fn corpus_files(&self, directory: &Path) -> std::io::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(directory)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && self.has_corpus_extension(path))
            .collect();

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    fn has_corpus_extension(&self, path: &Path) -> bool {
        path.extension().and_then(|ext| ext.to_str()) == Some(self.extension.as_str())
    }
}

/// Load `*.txt` corpus files from `directory` with the default loader
pub fn load(directory: &Path) -> Corpus {
    CorpusLoader::new().load(directory)
}

// ============================================================================
// FILE PARSING
// ============================================================================

fn read_corpus_file(path: &Path) -> Result<Vec<Value>, SkipReason> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    parse_records(&contents)
}

/// Parse corpus file contents into raw records
pub fn parse_records(contents: &str) -> Result<Vec<Value>, SkipReason> {
    let value: Value =
        serde_json::from_str(contents).map_err(|e| SkipReason::InvalidJson(e.to_string()))?;

    match value {
        Value::Array(records) => Ok(records),
        _ => Err(SkipReason::NotAnArray),
    }
}

// ============================================================================
// TESTS
// ============================================================================
