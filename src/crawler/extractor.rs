// Concurrent text extraction from crawled pages.
//
// Each page is refetched and reduced to prose: the title plus paragraph
// bodies, with markup stripped, entities decoded, non-ASCII collapsed to
// spaces, and each block cut at the first inline link. Pages that fail or
// come back empty are skipped with a warning rather than ending the run.

use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use regex_lite::Regex;
use tracing::{info, warn};

/// Fetches pages and reduces them to plain text.
pub struct TextExtractor {
    client: reqwest::Client,
    concurrency: usize,
    title: Regex,
    paragraph: Regex,
    script_style: Regex,
    tag: Regex,
    non_ascii: Regex,
}

impl TextExtractor {
    pub fn new(concurrency: usize) -> Result<Self> {
        Ok(Self {
            client: super::build_client()?,
            // buffer_unordered(0) would stall forever
            concurrency: concurrency.max(1),
            title: Regex::new(r"(?is)<title[^>]*>(.*?)</title>")
                .context("Invalid title pattern")?,
            paragraph: Regex::new(r"(?is)<p\b[^>]*>(.*?)</p>")
                .context("Invalid paragraph pattern")?,
            script_style: Regex::new(r"(?is)<(?:script|style)\b[^>]*>.*?</(?:script|style)>")
                .context("Invalid script pattern")?,
            tag: Regex::new(r"<[^>]+>").context("Invalid tag pattern")?,
            non_ascii: Regex::new(r"[^\x00-\x7F]+").context("Invalid ascii pattern")?,
        })
    }

    /// Extract text from every URL, keyed by URL. Order of fetches is not
    /// deterministic; the returned map is sorted by key.
    pub async fn extract_all(&self, urls: &[String]) -> BTreeMap<String, String> {
        let pb = ProgressBar::new(urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Extracting [{bar:30}] {pos}/{len} ({eta})")
                .unwrap(),
        );

        let results: Vec<(String, Result<String>)> =
            stream::iter(urls.iter().map(|url| async move {
                (url.clone(), self.fetch_text(url).await)
            }))
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut texts = BTreeMap::new();
        for (url, result) in results {
            match result {
                Ok(text) if !text.is_empty() => {
                    texts.insert(url, text);
                }
                Ok(_) => {
                    warn!(url = url, "Page yielded no text, skipping");
                }
                Err(e) => {
                    warn!(url = url, error = %e, "Extraction failed, skipping");
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        info!(
            extracted = texts.len(),
            requested = urls.len(),
            "Text extraction complete"
        );
        texts
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;
        if !response.status().is_success() {
            bail!("HTTP {} from {url}", response.status());
        }
        let html = response
            .text()
            .await
            .with_context(|| format!("Failed to read body from {url}"))?;
        Ok(self.clean_html(&html))
    }

    /// Title plus paragraph text, cleaned block by block.
    fn clean_html(&self, html: &str) -> String {
        let stripped = self.script_style.replace_all(html, " ");

        let mut blocks = Vec::new();
        if let Some(captures) = self.title.captures(&stripped) {
            blocks.push(self.clean_block(&captures[1]));
        }
        for captures in self.paragraph.captures_iter(&stripped) {
            blocks.push(self.clean_block(&captures[1]));
        }

        blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One markup block down to prose: tags out, entities decoded,
    /// non-ASCII to spaces, cut at the first inline link, whitespace
    /// normalized.
    fn clean_block(&self, block: &str) -> String {
        let no_tags = self.tag.replace_all(block, " ");
        let decoded = decode_entities(&no_tags);
        let ascii = self.non_ascii.replace_all(&decoded, " ");
        let cut = match ascii.find("https://") {
            Some(i) => &ascii[..i],
            None => &ascii[..],
        };
        cut.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// The handful of entities that dominate crawled prose. `&amp;` has to go
/// first so it cannot manufacture new entities.
fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
}
