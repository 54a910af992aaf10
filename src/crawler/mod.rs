// Web crawling: breadth-first link discovery and text extraction.

use std::time::Duration;

use anyhow::{Context, Result};

pub mod extractor;
pub mod spider;

const USER_AGENT: &str = "sediment/0.1 (topic-sentiment mapping)";
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client shared by the spider and the extractor.
pub(crate) fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("Failed to build HTTP client")
}
