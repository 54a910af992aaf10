use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use sediment::config::Config;
use sediment::sentiment::lexicon::LexiconScorer;
use sediment::sentiment::traits::SentimentScorer;

/// Sediment: topic clustering and sentiment mapping for crawled web text.
///
/// Crawls a site, extracts the prose, clusters it into topics, and reports
/// the average sentiment per topic. Each subcommand is one pipeline stage;
/// stages hand off through JSON artifacts in the output directory, so any
/// stage can be rerun on its own.
#[derive(Parser)]
#[command(name = "sediment", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl a site breadth-first and record the pages worth reading
    Crawl {
        /// Start URL for the crawl
        #[arg(long)]
        url: String,

        /// Stop after recording this many pages (default: SEDIMENT_CRAWL_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Extract plain text from every crawled page
    Extract {
        /// Pages to fetch in parallel (default: SEDIMENT_CONCURRENCY)
        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Cluster the extracted text into topics
    Cluster {
        /// Number of clusters to fit (default: SEDIMENT_CLUSTERS)
        #[arg(long)]
        clusters: Option<usize>,
    },

    /// Score sentiment per document and aggregate it per cluster
    Sentiment,

    /// Show which pipeline artifacts exist
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sediment=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Crawl { url, limit } => {
            if let Some(limit) = limit {
                config.crawl_limit = limit;
            }
            println!(
                "Crawling from {} (up to {} pages)...",
                url, config.crawl_limit
            );

            let spider =
                sediment::crawler::spider::Spider::new(config.crawl_limit, &config.deny_patterns)?;
            let visited = spider.crawl(&url).await?;
            if visited.is_empty() {
                bail!("Crawl recorded no pages; check the start URL");
            }

            let artifact = sediment::output::artifacts::VisitedUrls {
                visited_urls: visited,
            };
            let path = sediment::output::artifacts::urls_path(&config.output_dir);
            sediment::output::artifacts::write_json(&path, &artifact)?;

            println!(
                "{}",
                format!(
                    "Recorded {} URLs to {}",
                    artifact.visited_urls.len(),
                    path.display()
                )
                .bold()
            );
            println!("Next: run `sediment extract`");
        }

        Commands::Extract { concurrency } => {
            if let Some(concurrency) = concurrency {
                config.fetch_concurrency = concurrency;
            }

            let urls_path = sediment::output::artifacts::urls_path(&config.output_dir);
            let urls: sediment::output::artifacts::VisitedUrls =
                sediment::output::artifacts::read_json(&urls_path).with_context(|| {
                    format!(
                        "No crawl artifact in {}; run `sediment crawl` first",
                        config.output_dir.display()
                    )
                })?;

            println!(
                "Extracting text from {} pages ({} concurrent)...",
                urls.visited_urls.len(),
                config.fetch_concurrency
            );

            let extractor =
                sediment::crawler::extractor::TextExtractor::new(config.fetch_concurrency)?;
            let texts = extractor.extract_all(&urls.visited_urls).await;
            if texts.is_empty() {
                bail!("No page yielded any text; nothing to write");
            }

            let raw_path = sediment::output::artifacts::raw_text_path(&config.output_dir);
            sediment::output::artifacts::write_json(&raw_path, &texts)?;

            println!(
                "{}",
                format!(
                    "Extracted {} documents to {}",
                    texts.len(),
                    raw_path.display()
                )
                .bold()
            );
            println!("Next: run `sediment cluster`");
        }

        Commands::Cluster { clusters } => {
            if let Some(clusters) = clusters {
                config.n_clusters = clusters;
            }
            let summary = sediment::pipeline::cluster::run(&config, config.n_clusters)?;
            sediment::output::terminal::display_cluster_summary(&summary);
            println!("Next: run `sediment sentiment`");
        }

        Commands::Sentiment => {
            let scorer = build_scorer(&config)?;
            let summaries = sediment::pipeline::sentiment::run(&config, scorer.as_ref())?;
            for summary in &summaries {
                sediment::output::terminal::display_sentiment_report(summary);
            }
        }

        Commands::Status => {
            sediment::status::show(&config)?;
        }
    }

    Ok(())
}

/// Choose the sentiment scorer: a custom TSV lexicon when configured,
/// otherwise the built-in word list.
fn build_scorer(config: &Config) -> Result<Box<dyn SentimentScorer>> {
    match &config.lexicon_path {
        Some(path) => Ok(Box::new(LexiconScorer::from_tsv(path)?)),
        None => Ok(Box::new(LexiconScorer::builtin())),
    }
}
