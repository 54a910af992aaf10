// Unit tests for sentiment scoring: the built-in lexicon, TSV lexicon
// loading, per-document scoring through the trait, and cluster rollups.

use std::collections::BTreeMap;
use std::path::PathBuf;

use sediment::error::AnalysisError;
use sediment::sentiment::aggregate::{
    aggregate, score_documents, DocumentSentiment, LabeledDocument,
};
use sediment::sentiment::lexicon::LexiconScorer;
use sediment::sentiment::traits::SentimentScorer;

// ============================================================
// LexiconScorer::builtin — word list behavior
// ============================================================

#[test]
fn builtin_positive_words_score_positive() {
    let scorer = LexiconScorer::builtin();
    assert!(scorer.score("a great release with excellent documentation") > 0.0);
}

#[test]
fn builtin_negative_words_score_negative() {
    let scorer = LexiconScorer::builtin();
    assert!(scorer.score("a terrible release full of awful regressions") < 0.0);
}

#[test]
fn builtin_unknown_vocabulary_is_neutral() {
    let scorer = LexiconScorer::builtin();
    assert_eq!(scorer.score("kubernetes reconciles the desired state"), 0.0);
}

#[test]
fn builtin_scoring_ignores_case_and_punctuation() {
    let scorer = LexiconScorer::builtin();
    assert_eq!(
        scorer.score("GOOD, great... EXCELLENT!"),
        scorer.score("good great excellent")
    );
}

#[test]
fn builtin_opposite_words_cancel() {
    let scorer = LexiconScorer::builtin();
    // good (+3) and bad (-3)
    assert_eq!(scorer.score("good parts and bad parts"), 0.0);
}

// ============================================================
// LexiconScorer::from_tsv — custom lexicon loading
// ============================================================

fn temp_lexicon(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "sediment-lexicon-{}-{name}.tsv",
        std::process::id()
    ));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn from_tsv_loads_entries_and_skips_comments() {
    let path = temp_lexicon(
        "basic",
        "# project-specific valences\nrust\t4\nsegfault\t-3\n\nborrowck\t2\n",
    );
    let scorer = LexiconScorer::from_tsv(&path).unwrap();
    assert_eq!(scorer.len(), 3);
    assert_eq!(scorer.score("rust segfault"), 1.0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn from_tsv_accepts_fractional_valences() {
    let path = temp_lexicon("fractional", "meh\t-0.5\nokay\t0.5\n");
    let scorer = LexiconScorer::from_tsv(&path).unwrap();
    assert_eq!(scorer.score("meh okay okay"), 0.5);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn from_tsv_lowercases_keys() {
    let path = temp_lexicon("case", "LOUD\t2\n");
    let scorer = LexiconScorer::from_tsv(&path).unwrap();
    assert_eq!(scorer.score("loud"), 2.0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn from_tsv_rejects_line_without_tab() {
    let path = temp_lexicon("notab", "justoneword\n");
    let err = LexiconScorer::from_tsv(&path).unwrap_err();
    assert!(
        err.to_string().contains("line 1"),
        "Error should name the line: {err}"
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn from_tsv_rejects_non_numeric_valence() {
    let path = temp_lexicon("nonnumeric", "word\tvery\n");
    let result = LexiconScorer::from_tsv(&path);
    assert!(result.is_err());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn from_tsv_rejects_empty_lexicon() {
    let path = temp_lexicon("empty", "# only a comment\n\n");
    let err = LexiconScorer::from_tsv(&path).unwrap_err();
    assert!(
        err.to_string().contains("no entries"),
        "Error should say the file was empty: {err}"
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn from_tsv_missing_file_errors() {
    let path = std::env::temp_dir().join("sediment-lexicon-does-not-exist.tsv");
    assert!(LexiconScorer::from_tsv(&path).is_err());
}

// ============================================================
// score_documents — trait-driven scoring
// ============================================================

struct WordCountScorer;

impl SentimentScorer for WordCountScorer {
    fn score(&self, text: &str) -> f64 {
        text.split_whitespace().count() as f64
    }
}

#[test]
fn score_documents_applies_the_injected_scorer() {
    let labeled: BTreeMap<String, LabeledDocument> = [
        (
            "a".to_string(),
            LabeledDocument {
                cluster: 0,
                raw: "one two three".to_string(),
            },
        ),
        (
            "b".to_string(),
            LabeledDocument {
                cluster: 1,
                raw: "one".to_string(),
            },
        ),
    ]
    .into();

    let scored = score_documents(&labeled, &WordCountScorer);
    assert_eq!(scored["a"].score, 3.0);
    assert_eq!(scored["a"].cluster, 0);
    assert_eq!(scored["b"].score, 1.0);
    assert_eq!(scored["b"].raw, "one");
}

// ============================================================
// aggregate — cluster rollups
// ============================================================

fn scored(cluster: usize, score: f64) -> DocumentSentiment {
    DocumentSentiment {
        cluster,
        raw: String::new(),
        score,
    }
}

fn descriptors(labels: &[usize]) -> BTreeMap<usize, Vec<String>> {
    labels
        .iter()
        .map(|&label| (label, vec![format!("term{label}")]))
        .collect()
}

#[test]
fn four_documents_two_clusters_average_correctly() {
    let documents: BTreeMap<String, DocumentSentiment> = [
        ("a".to_string(), scored(0, 3.0)),
        ("b".to_string(), scored(0, 1.0)),
        ("c".to_string(), scored(1, -2.0)),
        ("d".to_string(), scored(1, 4.0)),
    ]
    .into();

    let report = aggregate(&documents, &descriptors(&[0, 1])).unwrap();
    assert_eq!(report[&0].avg_score, 2.0);
    assert_eq!(report[&0].count, 2);
    assert_eq!(report[&1].avg_score, 1.0);
    assert_eq!(report[&1].count, 2);
}

#[test]
fn clusters_without_documents_are_absent() {
    let documents: BTreeMap<String, DocumentSentiment> =
        [("a".to_string(), scored(2, 1.0))].into();
    let report = aggregate(&documents, &descriptors(&[0, 1, 2])).unwrap();
    assert_eq!(report.len(), 1);
    assert!(!report.contains_key(&0));
    assert!(!report.contains_key(&1));
}

#[test]
fn report_carries_the_cluster_descriptors() {
    let documents: BTreeMap<String, DocumentSentiment> =
        [("a".to_string(), scored(1, 0.5))].into();
    let report = aggregate(&documents, &descriptors(&[0, 1])).unwrap();
    assert_eq!(report[&1].top_terms, vec!["term1"]);
}

#[test]
fn missing_descriptor_is_a_data_consistency_error() {
    let documents: BTreeMap<String, DocumentSentiment> =
        [("a".to_string(), scored(7, 1.0))].into();
    let result = aggregate(&documents, &descriptors(&[0]));
    assert!(matches!(result, Err(AnalysisError::DataConsistency { .. })));
}

// ============================================================
// Lexicon scoring composed with aggregation
// ============================================================

#[test]
fn lexicon_scores_flow_into_the_cluster_report() {
    let labeled: BTreeMap<String, LabeledDocument> = [
        (
            "pos".to_string(),
            LabeledDocument {
                cluster: 0,
                raw: "good tooling".to_string(),
            },
        ),
        (
            "neg".to_string(),
            LabeledDocument {
                cluster: 0,
                raw: "bad tooling".to_string(),
            },
        ),
    ]
    .into();

    let scorer = LexiconScorer::builtin();
    let documents = score_documents(&labeled, &scorer);
    let report = aggregate(&documents, &descriptors(&[0])).unwrap();
    assert_eq!(report[&0].avg_score, 0.0);
    assert_eq!(report[&0].count, 2);
}
