// Pipeline status display: which artifacts exist and how far a run got.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};
use colored::Colorize;

use crate::config::Config;
use crate::output::artifacts::{self, VisitedUrls};

/// Display pipeline status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    let dir = &config.output_dir;
    if !dir.exists() {
        println!("Output directory: {} (not created yet)", dir.display());
        println!("\nRun `sediment crawl --url <START_URL>` to begin.");
        return Ok(());
    }
    println!("Output directory: {}", dir.display());

    // Crawl artifact
    let urls_path = artifacts::urls_path(dir);
    if urls_path.exists() {
        let urls: VisitedUrls = artifacts::read_json(&urls_path)?;
        println!(
            "Crawl: {} URLs recorded ({})",
            urls.visited_urls.len(),
            describe_file(&urls_path)
        );
    } else {
        println!("Crawl: not run yet");
        println!("  Run `sediment crawl --url <START_URL>` to collect pages");
    }

    // Extraction artifact
    let raw_path = artifacts::raw_text_path(dir);
    if raw_path.exists() {
        let texts: BTreeMap<String, String> = artifacts::read_json(&raw_path)?;
        println!(
            "Extract: {} documents ({})",
            texts.len(),
            describe_file(&raw_path)
        );
    } else {
        println!("Extract: not run yet");
        println!("  Run `sediment extract` to pull text from the crawled pages");
    }

    // One line per clustering run found on disk
    let counts = artifacts::labeled_cluster_counts(dir)?;
    if counts.is_empty() {
        println!("Clusters: none yet");
        println!("  Run `sediment cluster` to partition the documents");
    } else {
        println!("Clusters:");
        let mut unscored = 0;
        for n_clusters in counts {
            let scored = artifacts::cluster_scores_path(dir, n_clusters).exists();
            let state = if scored {
                "clustered + scored".green()
            } else {
                unscored += 1;
                "clustered".yellow()
            };
            println!("  {:>3} clusters: {}", n_clusters, state);
        }
        if unscored > 0 {
            println!("  Run `sediment sentiment` to score the remaining runs");
        }
    }

    Ok(())
}

fn describe_file(path: &Path) -> String {
    match fs::metadata(path) {
        Ok(meta) => {
            let size = format_bytes(meta.len());
            match meta.modified() {
                Ok(time) => {
                    let local: DateTime<Local> = time.into();
                    format!("{}, updated {}", size, local.format("%Y-%m-%d %H:%M"))
                }
                Err(_) => size,
            }
        }
        Err(_) => "unknown".to_string(),
    }
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
