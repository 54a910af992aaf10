// Per-document scoring and per-cluster sentiment rollup.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AnalysisError;
use crate::sentiment::traits::SentimentScorer;

/// A document after clustering: its cluster label and raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDocument {
    pub cluster: usize,
    pub raw: String,
}

/// A labeled document with its sentiment score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSentiment {
    pub cluster: usize,
    pub raw: String,
    pub score: f64,
}

/// Aggregated sentiment for one cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSentiment {
    pub avg_score: f64,
    pub count: usize,
    pub top_terms: Vec<String>,
}

/// Score every labeled document, preserving keys and labels.
pub fn score_documents(
    labeled: &BTreeMap<String, LabeledDocument>,
    scorer: &dyn SentimentScorer,
) -> BTreeMap<String, DocumentSentiment> {
    labeled
        .iter()
        .map(|(key, doc)| {
            let scored = DocumentSentiment {
                cluster: doc.cluster,
                raw: doc.raw.clone(),
                score: scorer.score(&doc.raw),
            };
            (key.clone(), scored)
        })
        .collect()
}

/// Roll scored documents up into per-cluster averages.
///
/// Clusters that received no documents do not appear in the result. Every
/// cluster that does appear must have an entry in `descriptors`; a missing
/// one means the labeled and descriptor artifacts came from different runs.
pub fn aggregate(
    scored: &BTreeMap<String, DocumentSentiment>,
    descriptors: &BTreeMap<usize, Vec<String>>,
) -> Result<BTreeMap<usize, ClusterSentiment>, AnalysisError> {
    let mut sums: BTreeMap<usize, (f64, usize)> = BTreeMap::new();
    for doc in scored.values() {
        let entry = sums.entry(doc.cluster).or_insert((0.0, 0));
        entry.0 += doc.score;
        entry.1 += 1;
    }

    let mut report = BTreeMap::new();
    for (label, (sum, count)) in sums {
        let Some(terms) = descriptors.get(&label) else {
            return Err(AnalysisError::data_consistency(format!(
                "cluster {label} appears in the scored documents but has no \
                 descriptor entry; the labeled and descriptor artifacts are \
                 from different runs"
            )));
        };
        report.insert(
            label,
            ClusterSentiment {
                avg_score: sum / count as f64,
                count,
                top_terms: terms.clone(),
            },
        );
    }

    info!(
        documents = scored.len(),
        clusters = report.len(),
        "Aggregated cluster sentiment"
    );
    Ok(report)
}
