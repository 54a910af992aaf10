use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::cluster::kmeans::DEFAULT_MAX_ITERATIONS;

/// Central configuration loaded from environment variables.
///
/// Every knob has a working default, so a bare `sediment crawl --url ...`
/// runs without any setup. The .env file is loaded automatically at
/// startup via dotenvy.
pub struct Config {
    /// Where stage artifacts are written (SEDIMENT_OUTPUT_DIR, default ./output).
    pub output_dir: PathBuf,
    /// Cluster count for the clustering stage (SEDIMENT_CLUSTERS, default 3).
    pub n_clusters: usize,
    /// Pages recorded before the crawl stops (SEDIMENT_CRAWL_LIMIT, default 100).
    pub crawl_limit: usize,
    /// Requested SVD components; clamped to what the corpus shape admits
    /// (SEDIMENT_SVD_DIM, default 100).
    pub svd_dim: usize,
    /// Descriptor terms kept per cluster (SEDIMENT_TOP_TERMS, default 20).
    pub top_terms: usize,
    /// K-means iteration cap (SEDIMENT_MAX_ITERATIONS, default 100).
    pub max_iterations: usize,
    /// Seed for every randomized step; same seed, same output
    /// (SEDIMENT_SEED, default 0).
    pub seed: u64,
    /// Concurrent fetches during extraction (SEDIMENT_CONCURRENCY, default 8).
    pub fetch_concurrency: usize,
    /// Comma-separated regexes; matching URLs are never crawled
    /// (SEDIMENT_DENY, default empty).
    pub deny_patterns: Vec<String>,
    /// Optional word<TAB>valence lexicon file replacing the built-in one
    /// (SEDIMENT_LEXICON).
    pub lexicon_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let deny_patterns = env::var("SEDIMENT_DENY")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|pattern| !pattern.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            output_dir: env::var("SEDIMENT_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./output")),
            n_clusters: parse_var("SEDIMENT_CLUSTERS", 3)?,
            crawl_limit: parse_var("SEDIMENT_CRAWL_LIMIT", 100)?,
            svd_dim: parse_var("SEDIMENT_SVD_DIM", 100)?,
            top_terms: parse_var("SEDIMENT_TOP_TERMS", 20)?,
            max_iterations: parse_var("SEDIMENT_MAX_ITERATIONS", DEFAULT_MAX_ITERATIONS)?,
            seed: parse_var("SEDIMENT_SEED", 0)?,
            fetch_concurrency: parse_var("SEDIMENT_CONCURRENCY", 8)?,
            deny_patterns,
            lexicon_path: env::var("SEDIMENT_LEXICON").ok().map(PathBuf::from),
        })
    }
}

/// Parse an optional numeric env var, keeping the default when unset and
/// failing loudly when set to something unusable.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e| {
            anyhow!(
                "{name} is set to {raw:?}, which does not parse: {e}.\n\
                 Unset it to use the default, or fix the value in your .env file."
            )
        }),
        Err(_) => Ok(default),
    }
}
