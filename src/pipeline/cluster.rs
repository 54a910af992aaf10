// Clustering stage: vectorize the extracted text, reduce it to a topic
// space, partition it, and write the descriptor and labeled-text artifacts.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::cluster::descriptors;
use crate::cluster::kmeans::KMeans;
use crate::cluster::svd::{clamp_components, TruncatedSvd};
use crate::cluster::vectorizer::TfidfVectorizer;
use crate::config::Config;
use crate::output::artifacts::{self, DescriptorMap};
use crate::sentiment::aggregate::LabeledDocument;

/// What a clustering run produced, for display and tests.
#[derive(Debug)]
pub struct ClusterStageSummary {
    pub n_clusters: usize,
    pub documents: usize,
    pub terms: usize,
    pub components: usize,
    pub iterations: usize,
    pub converged: bool,
    pub member_counts: Vec<usize>,
    pub descriptor_terms: Vec<Vec<String>>,
}

/// Run the clustering stage against the extracted-text artifact.
pub fn run(config: &Config, n_clusters: usize) -> Result<ClusterStageSummary> {
    // Step 1: Load the extracted text
    let raw_path = artifacts::raw_text_path(&config.output_dir);
    let corpus: BTreeMap<String, String> =
        artifacts::read_json(&raw_path).with_context(|| {
            format!(
                "No extracted text in {}; run `sediment extract` first",
                config.output_dir.display()
            )
        })?;

    // Step 2: TF-IDF vectorize
    let vectors = TfidfVectorizer::new().fit_transform(&corpus)?;

    // Step 3: Reduce to a low-rank topic space
    let components = clamp_components(config.svd_dim, vectors.n_docs(), vectors.n_terms());
    let (reduced, projection) =
        TruncatedSvd::new(components, config.seed).fit_transform(&vectors)?;

    // Step 4: Partition the reduced documents
    let fit = KMeans::new(n_clusters, config.max_iterations, config.seed).fit(&reduced)?;

    // Step 5: Describe each cluster and write the stage artifacts
    let descriptor_terms = descriptors::top_terms(
        &fit.centroids,
        &projection,
        &vectors.vocabulary,
        config.top_terms,
    );
    let descriptor_map = DescriptorMap(descriptor_terms.iter().cloned().enumerate().collect());
    artifacts::write_json(
        &artifacts::terms_path(&config.output_dir, n_clusters),
        &descriptor_map,
    )?;

    // Rows were vectorized in key order, so zipping the sorted corpus with
    // the assignments restores each document's label
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
    artifacts::write_json(
        &artifacts::labeled_path(&config.output_dir, n_clusters),
        &labeled,
    )?;

    info!(
        clusters = n_clusters,
        documents = vectors.n_docs(),
        "Clustering stage complete"
    );

    Ok(ClusterStageSummary {
        n_clusters,
        documents: vectors.n_docs(),
        terms: vectors.n_terms(),
        components,
        iterations: fit.iterations,
        converged: fit.converged,
        member_counts: fit.member_counts(),
        descriptor_terms,
    })
}
