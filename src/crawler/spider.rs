// Breadth-first site spider.
//
// Starting from one URL, the spider fetches pages, queues every same-origin
// or cross-origin HTTP(S) link it has not seen, and records pages until the
// crawl limit is hit. A `<meta name="robots">` tag carrying noindex or
// nofollow keeps a page out of the recorded list; its links are still
// followed so the crawl does not dead-end on an index page.

use std::collections::{HashSet, VecDeque};

use anyhow::{Context, Result};
use regex_lite::Regex;
use reqwest::Url;
use tracing::{debug, info, warn};

/// Crawler over HTML pages reachable from a start URL.
pub struct Spider {
    client: reqwest::Client,
    crawl_limit: usize,
    deny: Vec<Regex>,
    meta_tag: Regex,
    robots_name: Regex,
    content_attr: Regex,
    href_attr: Regex,
}

impl Spider {
    pub fn new(crawl_limit: usize, deny_patterns: &[String]) -> Result<Self> {
        let deny = deny_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("Invalid deny pattern {pattern:?}"))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            client: super::build_client()?,
            crawl_limit,
            deny,
            meta_tag: Regex::new(r"(?i)<meta\b[^>]*>").context("Invalid meta pattern")?,
            robots_name: Regex::new(r#"(?i)name\s*=\s*["']?robots\b"#)
                .context("Invalid robots pattern")?,
            content_attr: Regex::new(r#"(?i)content\s*=\s*["']([^"']*)["']"#)
                .context("Invalid content pattern")?,
            href_attr: Regex::new(r#"(?i)href\s*=\s*["']([^"']+)["']"#)
                .context("Invalid href pattern")?,
        })
    }

    /// Crawl breadth-first from `start_url` and return the recorded URLs in
    /// visit order.
    pub async fn crawl(&self, start_url: &str) -> Result<Vec<String>> {
        let start =
            Url::parse(start_url).with_context(|| format!("Invalid start URL {start_url:?}"))?;

        let mut frontier = VecDeque::new();
        let mut seen = HashSet::new();
        let mut recorded = Vec::new();
        seen.insert(start.to_string());
        frontier.push_back(start);

        while let Some(url) = frontier.pop_front() {
            if recorded.len() >= self.crawl_limit {
                info!(limit = self.crawl_limit, "Crawl limit reached");
                break;
            }

            let Some(html) = self.fetch_html(&url).await else {
                continue;
            };

            if self.robots_meta_allows(&html) {
                debug!(url = url.to_string(), "Recorded page");
                recorded.push(url.to_string());
            } else {
                debug!(url = url.to_string(), "Robots meta excludes page");
            }

            for link in self.extract_links(&url, &html) {
                if seen.insert(link.to_string()) {
                    frontier.push_back(link);
                }
            }
        }

        info!(
            recorded = recorded.len(),
            discovered = seen.len(),
            "Crawl complete"
        );
        Ok(recorded)
    }

    /// Fetch a page, returning its body only for successful HTML responses.
    /// Failures are logged and skipped so one bad page cannot end the crawl.
    async fn fetch_html(&self, url: &Url) -> Option<String> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = url.to_string(), error = %e, "Fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                url = url.to_string(),
                status = response.status().as_u16(),
                "Skipping non-success response"
            );
            return None;
        }

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.contains("text/html"))
            .unwrap_or(false);
        if !is_html {
            debug!(url = url.to_string(), "Skipping non-HTML content");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = url.to_string(), error = %e, "Failed to read body");
                None
            }
        }
    }

    /// Whether the page may be recorded. Only `<meta name="robots">` is
    /// consulted; noindex and nofollow both exclude the page.
    fn robots_meta_allows(&self, html: &str) -> bool {
        for tag in self.meta_tag.find_iter(html) {
            let tag = tag.as_str();
            if !self.robots_name.is_match(tag) {
                continue;
            }
            if let Some(captures) = self.content_attr.captures(tag) {
                let directives = captures[1].to_lowercase();
                if directives.contains("noindex") || directives.contains("nofollow") {
                    return false;
                }
            }
        }
        true
    }

    /// Every followable link on the page: resolved against the base URL,
    /// HTTP(S) only, fragment stripped, deny patterns applied.
    fn extract_links(&self, base: &Url, html: &str) -> Vec<Url> {
        let mut links = Vec::new();
        for captures in self.href_attr.captures_iter(html) {
            let Ok(mut resolved) = base.join(&captures[1]) else {
                continue;
            };
            if resolved.scheme() != "http" && resolved.scheme() != "https" {
                continue;
            }
            resolved.set_fragment(None);
            if self.deny.iter().any(|pattern| pattern.is_match(resolved.as_str())) {
                continue;
            }
            links.push(resolved);
        }
        links
    }
}
