// Colored terminal output for cluster and sentiment summaries.
//
// This module handles all terminal-specific formatting: colors, tables,
// score highlighting. The main.rs display calls delegate here.

use colored::Colorize;

use crate::pipeline::cluster::ClusterStageSummary;
use crate::pipeline::sentiment::SentimentStageSummary;

/// Display the outcome of a clustering run.
pub fn display_cluster_summary(summary: &ClusterStageSummary) {
    println!(
        "\n{}",
        format!(
            "=== Clusters ({} documents, {} clusters) ===",
            summary.documents, summary.n_clusters
        )
        .bold()
    );

    let convergence = if summary.converged {
        format!("converged after {} iterations", summary.iterations)
    } else {
        format!("stopped at the {}-iteration cap", summary.iterations)
    };
    println!(
        "  {}",
        format!(
            "{} terms, {} components, {convergence}",
            summary.terms, summary.components
        )
        .dimmed()
    );
    println!();

    for (label, count) in summary.member_counts.iter().enumerate() {
        let terms = summary
            .descriptor_terms
            .get(label)
            .map(|t| t.join(", "))
            .unwrap_or_default();
        let preview = super::truncate_chars(&terms, 64);
        if *count == 0 {
            println!(
                "  {} {}",
                format!("#{label}").dimmed(),
                "(empty)".dimmed()
            );
        } else {
            println!(
                "  {} {:>4} docs  {}",
                format!("#{label}").bold(),
                count,
                preview.dimmed()
            );
        }
    }
    println!();
}

/// Display an aggregated sentiment report.
pub fn display_sentiment_report(summary: &SentimentStageSummary) {
    println!(
        "\n{}",
        format!(
            "=== Cluster Sentiment ({} clusters, {} documents) ===",
            summary.report.0.len(),
            summary.documents
        )
        .bold()
    );
    println!();

    // Header
    println!(
        "  {:>7}  {:>4}  {:>6}  {}",
        "Cluster".dimmed(),
        "Docs".dimmed(),
        "Avg".dimmed(),
        "Top terms".dimmed(),
    );
    println!("  {}", "-".repeat(76).dimmed());

    for (label, cluster) in &summary.report.0 {
        let terms = cluster.top_terms.join(", ");
        let preview = super::truncate_chars(&terms, 52);
        println!(
            "  {:>7}  {:>4}  {:>6}  {}",
            label,
            cluster.count,
            colorize_score(cluster.avg_score),
            preview.dimmed()
        );
    }
    println!();
}

/// Colorize an average sentiment score.
fn colorize_score(score: f64) -> colored::ColoredString {
    let text = format!("{score:+.2}");
    if score >= 1.0 {
        text.green()
    } else if score <= -1.0 {
        text.red()
    } else {
        text.normal()
    }
}
