//! Corpus Module
//!
//! Loads the fixed question/answer corpus:
//! - Directory scanning with an extension filter and stable file order
//! - Per-file JSON parsing with skip-and-report recovery
//! - Field-name normalization over an ordered list of accepted schemas

mod entry;
mod loader;

pub use entry::{normalize_record, Corpus, FaqEntry, FieldSchema, ACCEPTED_SCHEMAS};
pub use loader::{
    load, parse_records, CorpusLoader, LoadReport, SkipReason, SkippedFile,
    DEFAULT_CORPUS_EXTENSION,
};
