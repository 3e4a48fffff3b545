//! Property Tests
//!
//! Invariants of the loader and matcher that must hold for any corpus:
//! - Every loaded entry carries both fields, whatever the source casing
//! - Bad files and bad records never abort a load
//! - Entry `i` always pairs question `i` with answer `i` and vector `i`
//! - Similarity exactly at the threshold is not a match
//! - An empty corpus never calls the model
//! - Ties resolve to the earliest entry

use std::sync::Arc;

use faqmatch_core::{
    respond, BestMatch, Corpus, FaqEntry, MatchResult, SemanticMatcher, SkipReason,
    FALLBACK_RESPONSE,
};
use faqmatch_e2e_tests::harness::TestCorpusDir;
use faqmatch_e2e_tests::mocks::{
    support_corpus_records, support_corpus_records_capitalized, ConceptEmbedder,
    CountingEmbedder, FixedEmbedder, MONEY_BACK,
};
use serde_json::json;

// ============================================================================
// LOADER NORMALIZATION
// ============================================================================

#[test]
fn test_both_casings_normalize_to_one_shape() {
    let dir = TestCorpusDir::new();
    dir.write_records("a.txt", &support_corpus_records());
    dir.write_records("b.txt", &support_corpus_records_capitalized());

    let corpus = dir.load();

    assert_eq!(corpus.len(), 4);
    for entry in &corpus {
        assert!(!entry.question.is_empty());
        assert!(!entry.answer.is_empty());
    }
    assert_eq!(
        corpus.get(3),
        Some(&FaqEntry::new("Which payment cards do you accept?", "Visa and Mastercard."))
    );
}

#[test]
fn test_records_missing_a_field_are_dropped() {
    let dir = TestCorpusDir::new();
    dir.write_records(
        "mixed.txt",
        &json!([
            {"question": "Kept?", "answer": "Yes."},
            {"question": "No answer"},
            {"Answer": "No question"},
            {"question": "Mixed", "Answer": "casing"},
            {"question": 7, "answer": "not a string"},
            "just a string",
            {"Question": "Also kept?", "Answer": "Yes."}
        ]),
    );

    let report = dir.load_report();

    assert_eq!(report.corpus.len(), 2);
    assert_eq!(report.records_dropped, 5);
    assert_eq!(report.corpus.get(1).unwrap().question, "Also kept?");
}

#[test]
fn test_extra_fields_are_ignored() {
    let dir = TestCorpusDir::new();
    dir.write_records(
        "extra.txt",
        &json!([{"question": "Q", "answer": "A", "source": "handbook", "id": 12}]),
    );

    assert_eq!(dir.load().entries(), &[FaqEntry::new("Q", "A")]);
}

// ============================================================================
// LOADER ROBUSTNESS
// ============================================================================

#[test]
fn test_bad_files_are_skipped_not_fatal() {
    let dir = TestCorpusDir::new();
    dir.write_raw("a_truncated.txt", "[{\"question\": \"Q\"");
    dir.write_raw("b_empty.txt", "");
    dir.write_records("c_object.txt", &json!({"question": "Q", "answer": "A"}));
    dir.write_records("d_good.txt", &support_corpus_records());

    let report = dir.load_report();

    assert_eq!(report.corpus.len(), 2);
    assert_eq!(report.files_read, 1);
    assert_eq!(report.skipped.len(), 3);
    assert!(matches!(report.skipped[0].reason, SkipReason::InvalidJson(_)));
    assert!(matches!(report.skipped[1].reason, SkipReason::InvalidJson(_)));
    assert_eq!(report.skipped[2].reason, SkipReason::NotAnArray);
}

#[test]
fn test_only_matching_extension_is_read() {
    let dir = TestCorpusDir::new();
    dir.write_records("faq.txt", &support_corpus_records());
    dir.write_records("faq.json", &support_corpus_records_capitalized());
    dir.write_records("faq.TXT", &support_corpus_records_capitalized());
    dir.write_records("README", &support_corpus_records_capitalized());

    let corpus = dir.load();

    assert_eq!(corpus.len(), 2);
    assert_eq!(corpus.get(0).unwrap().answer, "30 days.");
}

#[test]
fn test_files_load_in_name_order() {
    let dir = TestCorpusDir::new();
    dir.write_records("20.txt", &json!([{"question": "second", "answer": "2"}]));
    dir.write_records("100.txt", &json!([{"question": "first", "answer": "1"}]));
    dir.write_records("3.txt", &json!([{"question": "third", "answer": "3"}]));

    let questions: Vec<String> = dir.load().iter().map(|e| e.question.clone()).collect();

    // Lexicographic, not numeric
    assert_eq!(questions, vec!["first", "second", "third"]);
}

// ============================================================================
// ALIGNMENT
// ============================================================================

fn one_hot(i: usize, dims: usize) -> Vec<f32> {
    let mut v = vec![0.0; dims];
    v[i] = 1.0;
    v
}

#[test]
fn test_each_question_retrieves_its_own_answer() {
    let entries: Vec<FaqEntry> = (0..6)
        .map(|i| FaqEntry::new(format!("question {}", i), format!("answer {}", i)))
        .collect();

    let mut embedder = FixedEmbedder::new(vec![0.0; 6]);
    for (i, entry) in entries.iter().enumerate() {
        embedder = embedder.with(&entry.question, one_hot(i, 6));
    }

    let matcher = SemanticMatcher::build(Corpus::new(entries.clone()), Arc::new(embedder)).unwrap();

    assert_eq!(matcher.len(), matcher.index().len());
    for (i, entry) in entries.iter().enumerate() {
        let best = matcher.best_match(&entry.question).unwrap().unwrap();
        assert_eq!(best.index, i);
        assert_eq!(respond(&matcher, &entry.question), entry.answer);
    }
}

#[test]
fn test_duplicate_questions_keep_first_answer() {
    let dir = TestCorpusDir::new();
    dir.write_records(
        "dupes.txt",
        &json!([
            {"question": "What is your return policy?", "answer": "30 days."},
            {"question": "What is your return policy?", "answer": "60 days."}
        ]),
    );

    let matcher = dir.matcher(ConceptEmbedder);

    assert_eq!(matcher.len(), 2);
    assert_eq!(respond(&matcher, MONEY_BACK), "30 days.");
}

// ============================================================================
// THRESHOLD
// ============================================================================

fn boundary_matcher() -> SemanticMatcher {
    // cos([1,1,0,0], [1,0,1,0]) = 1 / sqrt(2 * 2) = 0.5 exactly
    let embedder = FixedEmbedder::new(vec![0.0; 4])
        .with("stored", vec![1.0, 1.0, 0.0, 0.0])
        .with("query", vec![1.0, 0.0, 1.0, 0.0]);
    let corpus = Corpus::new(vec![FaqEntry::new("stored", "stored answer")]);

    SemanticMatcher::build(corpus, Arc::new(embedder)).unwrap()
}

#[test]
fn test_score_exactly_at_threshold_is_no_match() {
    let matcher = boundary_matcher();

    let best = matcher.best_match("query").unwrap().unwrap();
    assert_eq!(best.score, 0.5);
    assert_eq!(matcher.match_query("query").unwrap(), MatchResult::NoMatch);
    assert_eq!(matcher.respond("query"), FALLBACK_RESPONSE);
}

#[test]
fn test_score_above_threshold_is_match() {
    let matcher = boundary_matcher().with_threshold(0.49);

    assert_eq!(
        matcher.match_query("query").unwrap(),
        MatchResult::Answer("stored answer".to_string())
    );
}

#[test]
fn test_decide_boundary() {
    let matcher = boundary_matcher();

    let at = BestMatch { index: 0, score: 0.5 };
    let below = BestMatch { index: 0, score: 0.4999 };
    let above = BestMatch { index: 0, score: 0.50001 };

    assert_eq!(matcher.decide(Some(at)), MatchResult::NoMatch);
    assert_eq!(matcher.decide(Some(below)), MatchResult::NoMatch);
    assert_eq!(matcher.decide(Some(above)), MatchResult::Answer("stored answer".to_string()));
    assert_eq!(matcher.decide(None), MatchResult::NoMatch);
}

#[test]
fn test_zero_vector_query_is_no_match() {
    let matcher = boundary_matcher();

    // Unknown text gets the all-zero fallback vector
    assert_eq!(matcher.match_query("something else").unwrap(), MatchResult::NoMatch);
}

// ============================================================================
// EMPTY CORPUS
// ============================================================================

#[test]
fn test_empty_corpus_never_embeds() {
    let counter = Arc::new(CountingEmbedder::new(ConceptEmbedder));
    let matcher = SemanticMatcher::build(Corpus::default(), counter.clone()).unwrap();

    for query in ["", MONEY_BACK, "anything at all"] {
        assert_eq!(matcher.match_query(query).unwrap(), MatchResult::NoMatch);
        assert_eq!(respond(&matcher, query), FALLBACK_RESPONSE);
    }

    assert_eq!(counter.embed_calls(), 0);
    assert_eq!(counter.batch_calls(), 0);
}

#[test]
fn test_corpus_embedded_once_at_startup() {
    let dir = TestCorpusDir::new();
    dir.write_records("support.txt", &support_corpus_records());

    let counter = Arc::new(CountingEmbedder::new(ConceptEmbedder));
    let matcher = SemanticMatcher::build(dir.load(), counter.clone()).unwrap();

    assert_eq!(counter.batch_calls(), 1);

    respond(&matcher, MONEY_BACK);
    respond(&matcher, MONEY_BACK);

    assert_eq!(counter.batch_calls(), 1);
    assert_eq!(counter.embed_calls(), 2);
}

// ============================================================================
// TIE-BREAK
// ============================================================================

#[test]
fn test_tie_resolves_to_lowest_index() {
    let entries: Vec<FaqEntry> = (0..7)
        .map(|i| FaqEntry::new(format!("q{}", i), format!("a{}", i)))
        .collect();

    let mut embedder = FixedEmbedder::new(vec![0.0, 1.0]);
    embedder = embedder
        .with("q2", vec![1.0, 0.0])
        .with("q5", vec![1.0, 0.0])
        .with("query", vec![1.0, 0.0]);

    let matcher = SemanticMatcher::build(Corpus::new(entries), Arc::new(embedder)).unwrap();

    let best = matcher.best_match("query").unwrap().unwrap();
    assert_eq!(best.index, 2);
    assert_eq!(respond(&matcher, "query"), "a2");
}
