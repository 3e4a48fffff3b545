//! FAQ entries and record normalization

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ============================================================================
// FAQ ENTRY
// ============================================================================

/// A single known question and its answer.
///
/// Identity is the entry's position in its [`Corpus`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FaqEntry {
    /// The question text that gets embedded
    pub question: String,
    /// The answer returned when the question matches
    pub answer: String,
}

impl FaqEntry {
    /// Create a new entry
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

// ============================================================================
// RECORD SCHEMAS
// ============================================================================

/// A pair of JSON keys under which a record carries its question and answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    /// Key holding the question
    pub question: &'static str,
    /// Key holding the answer
    pub answer: &'static str,
}

impl FieldSchema {
    /// True when the record has both keys, whatever their values
    pub fn matches(&self, record: &Map<String, Value>) -> bool {
        record.contains_key(self.question) && record.contains_key(self.answer)
    }
}

/// Accepted schemas, tried in order. The first schema whose keys are both
/// present decides the record; later schemas are never consulted.
pub const ACCEPTED_SCHEMAS: [FieldSchema; 2] = [
    FieldSchema {
        question: "question",
        answer: "answer",
    },
    FieldSchema {
        question: "Question",
        answer: "Answer",
    },
];

/// Normalize one JSON record into a canonical [`FaqEntry`].
///
/// Returns `None` for non-objects, records matching no schema (including
/// mixed casing such as `Question` + `answer`), and records whose selected
/// schema carries non-string values.
pub fn normalize_record(record: &Value) -> Option<FaqEntry> {
    let object = record.as_object()?;
    let schema = ACCEPTED_SCHEMAS.iter().find(|s| s.matches(object))?;

    let question = object.get(schema.question)?.as_str()?;
    let answer = object.get(schema.answer)?.as_str()?;

    Some(FaqEntry::new(question, answer))
}

// ============================================================================
// CORPUS
// ============================================================================

/// Ordered, immutable sequence of FAQ entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Corpus {
    entries: Vec<FaqEntry>,
}

impl Corpus {
    /// Create a corpus from entries, preserving their order
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&FaqEntry> {
        self.entries.get(index)
    }

    /// All entries in order
    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Iterate over entries in order
    pub fn iter(&self) -> std::slice::Iter<'_, FaqEntry> {
        self.entries.iter()
    }

    /// Question texts in corpus order
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.question.as_str())
    }
}

impl From<Vec<FaqEntry>> for Corpus {
    fn from(entries: Vec<FaqEntry>) -> Self {
        Self::new(entries)
    }
}

impl FromIterator<FaqEntry> for Corpus {
    fn from_iter<I: IntoIterator<Item = FaqEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a FaqEntry;
    type IntoIter = std::slice::Iter<'a, FaqEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
