// JSON artifacts exchanged between pipeline stages.
//
// Cluster-keyed maps serialize as "cluster_<label>" objects with the keys
// in numeric label order, so cluster_2 precedes cluster_10. That needs
// hand-rolled Serialize impls; serde_json's map type would sort the keys
// lexicographically.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::info;

use crate::sentiment::aggregate::ClusterSentiment;

/// Crawl output: every URL whose text is worth extracting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitedUrls {
    pub visited_urls: Vec<String>,
}

/// Descriptor terms per cluster label.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorMap(pub BTreeMap<usize, Vec<String>>);

/// Aggregated sentiment per cluster label.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReport(pub BTreeMap<usize, ClusterSentiment>);

fn cluster_key(label: usize) -> String {
    format!("cluster_{label}")
}

fn parse_cluster_key(key: &str) -> Option<usize> {
    key.strip_prefix("cluster_")?.parse().ok()
}

fn serialize_cluster_map<S, V>(
    entries: &BTreeMap<usize, V>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (label, value) in entries {
        map.serialize_entry(&cluster_key(*label), value)?;
    }
    map.end()
}

fn deserialize_cluster_map<'de, D, V>(deserializer: D) -> Result<BTreeMap<usize, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    let raw: BTreeMap<String, V> = BTreeMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| {
            parse_cluster_key(&key)
                .map(|label| (label, value))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cluster key {key:?}"))
                })
        })
        .collect()
}

impl Serialize for DescriptorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_cluster_map(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for DescriptorMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_cluster_map(deserializer).map(DescriptorMap)
    }
}

impl Serialize for ClusterReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_cluster_map(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for ClusterReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_cluster_map(deserializer).map(ClusterReport)
    }
}

/// Pretty-print a value as JSON at `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = path.display().to_string(), "Wrote artifact");
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn urls_path(output_dir: &Path) -> PathBuf {
    output_dir.join("urls.json")
}

pub fn raw_text_path(output_dir: &Path) -> PathBuf {
    output_dir.join("raw_text.json")
}

pub fn terms_path(output_dir: &Path, n_clusters: usize) -> PathBuf {
    output_dir.join(format!("terms_{n_clusters}_clusters.json"))
}

pub fn labeled_path(output_dir: &Path, n_clusters: usize) -> PathBuf {
    output_dir.join(format!("labeled_text_{n_clusters}_clusters.json"))
}

pub fn doc_scores_path(output_dir: &Path, n_clusters: usize) -> PathBuf {
    output_dir.join(format!("doc_scores_{n_clusters}_clusters.json"))
}

pub fn cluster_scores_path(output_dir: &Path, n_clusters: usize) -> PathBuf {
    output_dir.join(format!("cluster_scores_{n_clusters}_clusters.json"))
}

/// Cluster counts for which a labeled-text artifact exists, ascending.
pub fn labeled_cluster_counts(output_dir: &Path) -> Result<Vec<usize>> {
    let pattern =
        Regex::new(r"^labeled_text_(\d+)_clusters\.json$").context("Invalid artifact pattern")?;
    if !output_dir.exists() {
        return Ok(Vec::new());
    }

    let mut counts = Vec::new();
    let entries = fs::read_dir(output_dir)
        .with_context(|| format!("Failed to list {}", output_dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if let Some(captures) = pattern.captures(name) {
            if let Ok(n) = captures[1].parse::<usize>() {
                counts.push(n);
            }
        }
    }
    counts.sort_unstable();
    counts.dedup();
    Ok(counts)
}
