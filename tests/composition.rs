// Composition tests: the clustering chain on a tiny corpus with a known
// right answer, and the pipeline stages exchanging real artifacts through
// a scratch output directory. No network involved; a fixed corpus stands
// in for extracted text.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use sediment::cluster::kmeans::KMeans;
use sediment::cluster::svd::{clamp_components, TruncatedSvd};
use sediment::cluster::vectorizer::TfidfVectorizer;
use sediment::config::Config;
use sediment::output::artifacts::{self, ClusterReport};
use sediment::sentiment::aggregate::{
    aggregate, score_documents, ClusterSentiment, DocumentSentiment, LabeledDocument,
};
use sediment::sentiment::lexicon::LexiconScorer;

/// Three tiny documents with an unambiguous structure: "a" and "c" share
/// vocabulary and positive wording, "b" shares nothing and reads negative.
fn tiny_corpus() -> BTreeMap<String, String> {
    [
        ("a", "good great excellent"),
        ("b", "bad terrible awful"),
        ("c", "good excellent nice"),
    ]
    .iter()
    .map(|&(key, text)| (key.to_string(), text.to_string()))
    .collect()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sediment-test-{}-{name}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn test_config(output_dir: PathBuf) -> Config {
    Config {
        output_dir,
        n_clusters: 2,
        crawl_limit: 10,
        svd_dim: 100,
        top_terms: 5,
        max_iterations: 100,
        seed: 0,
        fetch_concurrency: 2,
        deny_patterns: Vec::new(),
        lexicon_path: None,
    }
}

// ============================================================
// Clustering chain — known corpus, known partition
// ============================================================

#[test]
fn related_documents_cluster_together_and_score_higher() {
    let corpus = tiny_corpus();
    let vectors = TfidfVectorizer::new().fit_transform(&corpus).unwrap();

    let components = clamp_components(100, vectors.n_docs(), vectors.n_terms());
    let (reduced, _projection) = TruncatedSvd::new(components, 0)
        .fit_transform(&vectors)
        .unwrap();
    let fit = KMeans::new(2, 100, 0).fit(&reduced).unwrap();

    // doc_keys are sorted, so rows are a, b, c
    let (label_a, label_b, label_c) =
        (fit.assignments[0], fit.assignments[1], fit.assignments[2]);
    assert_eq!(label_a, label_c, "a and c share vocabulary");
    assert_ne!(label_a, label_b, "b shares nothing with a or c");

    // Wire the partition into sentiment
    let labeled: BTreeMap<String, LabeledDocument> = corpus
        .iter()
        .zip(&fit.assignments)
        .map(|((key, raw), &cluster)| {
            (
                key.clone(),
                LabeledDocument {
                    cluster,
                    raw: raw.clone(),
                },
            )
        })
        .collect();
    let scored = score_documents(&labeled, &LexiconScorer::builtin());
    let descriptors: BTreeMap<usize, Vec<String>> =
        [(label_a, Vec::new()), (label_b, Vec::new())].into();
    let report = aggregate(&scored, &descriptors).unwrap();

    assert!(report[&label_a].avg_score > 0.0);
    assert!(report[&label_b].avg_score < 0.0);
    assert!(
        report[&label_b].avg_score < report[&label_a].avg_score,
        "the isolated negative document must drag its cluster down"
    );
}

// ============================================================
// Pipeline stages — artifacts on disk
// ============================================================

#[test]
fn cluster_and_sentiment_stages_exchange_artifacts() {
    let dir = scratch_dir("stages");
    let config = test_config(dir.clone());

    // Stand in for the extraction stage
    artifacts::write_json(&artifacts::raw_text_path(&dir), &tiny_corpus()).unwrap();

    let summary = sediment::pipeline::cluster::run(&config, 2).unwrap();
    assert_eq!(summary.documents, 3);
    assert_eq!(summary.n_clusters, 2);
    assert!(artifacts::terms_path(&dir, 2).exists());
    assert!(artifacts::labeled_path(&dir, 2).exists());

    let scorer = LexiconScorer::builtin();
    let summaries = sediment::pipeline::sentiment::run(&config, &scorer).unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(artifacts::doc_scores_path(&dir, 2).exists());
    assert!(artifacts::cluster_scores_path(&dir, 2).exists());

    // The report on disk matches what the stage returned
    let report: ClusterReport =
        artifacts::read_json(&artifacts::cluster_scores_path(&dir, 2)).unwrap();
    assert_eq!(report, summaries[0].report);
    assert_eq!(report.0.len(), 2);

    // Raw lexicon sums survive the trip through every artifact
    let scores: BTreeMap<String, DocumentSentiment> =
        artifacts::read_json(&artifacts::doc_scores_path(&dir, 2)).unwrap();
    assert_eq!(scores["a"].score, 9.0);
    assert_eq!(scores["b"].score, -9.0);
    assert_eq!(scores["c"].score, 9.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn sentiment_stage_without_clusters_fails_with_a_hint() {
    let dir = scratch_dir("no-clusters");
    let config = test_config(dir.clone());

    let scorer = LexiconScorer::builtin();
    let err = sediment::pipeline::sentiment::run(&config, &scorer).unwrap_err();
    assert!(
        err.to_string().contains("sediment cluster"),
        "Error should point at the missing stage: {err}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn clustering_runs_reproduce_byte_identical_artifacts() {
    let first_dir = scratch_dir("determinism-first");
    let second_dir = scratch_dir("determinism-second");

    for dir in [&first_dir, &second_dir] {
        artifacts::write_json(&artifacts::raw_text_path(dir), &tiny_corpus()).unwrap();
        let config = test_config(dir.clone());
        sediment::pipeline::cluster::run(&config, 2).unwrap();
    }

    let first = fs::read_to_string(artifacts::labeled_path(&first_dir, 2)).unwrap();
    let second = fs::read_to_string(artifacts::labeled_path(&second_dir, 2)).unwrap();
    assert_eq!(first, second, "Same corpus and seed, same bytes on disk");

    let _ = fs::remove_dir_all(&first_dir);
    let _ = fs::remove_dir_all(&second_dir);
}

// ============================================================
// Report serialization — key order
// ============================================================

#[test]
fn report_keys_serialize_in_numeric_order() {
    let report = ClusterReport(
        (0..12)
            .map(|label| {
                (
                    label,
                    ClusterSentiment {
                        avg_score: 0.0,
                        count: 1,
                        top_terms: Vec::new(),
                    },
                )
            })
            .collect(),
    );
    let json = serde_json::to_string_pretty(&report).unwrap();
    let two = json.find("\"cluster_2\"").unwrap();
    let ten = json.find("\"cluster_10\"").unwrap();
    assert!(
        two < ten,
        "cluster_2 must come before cluster_10, not lexicographic order"
    );
}
