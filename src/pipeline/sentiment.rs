// Sentiment stage: score every labeled document and roll the scores up
// into a per-cluster report, once per clustering run found on disk.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::config::Config;
use crate::output::artifacts::{self, ClusterReport, DescriptorMap};
use crate::sentiment::aggregate::{self, LabeledDocument};
use crate::sentiment::traits::SentimentScorer;

/// What one sentiment run produced, for display and tests.
#[derive(Debug)]
pub struct SentimentStageSummary {
    pub n_clusters: usize,
    pub documents: usize,
    pub report: ClusterReport,
}

/// Run the sentiment stage for every labeled-text artifact present.
pub fn run(config: &Config, scorer: &dyn SentimentScorer) -> Result<Vec<SentimentStageSummary>> {
    let counts = artifacts::labeled_cluster_counts(&config.output_dir)?;
    if counts.is_empty() {
        bail!(
            "No labeled text artifacts in {}; run `sediment cluster` first",
            config.output_dir.display()
        );
    }
    counts
        .into_iter()
        .map(|n_clusters| run_one(config, scorer, n_clusters))
        .collect()
}

fn run_one(
    config: &Config,
    scorer: &dyn SentimentScorer,
    n_clusters: usize,
) -> Result<SentimentStageSummary> {
    let labeled: BTreeMap<String, LabeledDocument> =
        artifacts::read_json(&artifacts::labeled_path(&config.output_dir, n_clusters))?;
    let descriptors: DescriptorMap =
        artifacts::read_json(&artifacts::terms_path(&config.output_dir, n_clusters))
            .with_context(|| {
                format!(
                    "Descriptor artifact missing for {n_clusters} clusters; \
                     rerun `sediment cluster --clusters {n_clusters}`"
                )
            })?;

    let scored = aggregate::score_documents(&labeled, scorer);
    artifacts::write_json(
        &artifacts::doc_scores_path(&config.output_dir, n_clusters),
        &scored,
    )?;

    let report = ClusterReport(aggregate::aggregate(&scored, &descriptors.0)?);
    artifacts::write_json(
        &artifacts::cluster_scores_path(&config.output_dir, n_clusters),
        &report,
    )?;

    info!(
        clusters = n_clusters,
        documents = scored.len(),
        "Sentiment stage complete"
    );

    Ok(SentimentStageSummary {
        n_clusters,
        documents: scored.len(),
        report,
    })
}
