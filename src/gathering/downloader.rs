//! Page Downloader
//!
//! Downloads archived page slices and reduces them to plain text. A slice
//! is a gzip member inside a large archive file, addressed by the
//! descriptor's byte range and fetched with an HTTP `Range` request.
//!
//! Every call carries the configured timeout. Failures on the fetch path
//! (network, timeout, bad gzip, no HTML payload) degrade the item to empty
//! text; they are logged and never surface as errors. Retries are off by
//! default and enabled through the `fetch_attempts` configuration hook.

use super::indices::parse_index_lines;
use super::types::IndexDescriptor;
use crate::config::GatheringConfig;
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use regex::Regex;
use std::io::Read;
use std::time::Duration;

pub struct PageDownloader {
    client: reqwest::Client,
    config: GatheringConfig,
    block_elements: Regex,
    tags: Regex,
}

impl PageDownloader {
    pub fn new(config: GatheringConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            block_elements: Regex::new(r"(?is)<script\b.*?</script>|<style\b.*?</style>")
                .expect("static pattern"),
            tags: Regex::new(r"(?s)<[^>]*>").expect("static pattern"),
        }
    }

    /// Fetches and decodes the page behind `descriptor`. Returns empty text
    /// on any failure; callers treat empty text as "not relevant".
    pub async fn fetch_text(&self, descriptor: &IndexDescriptor) -> String {
        match self.download_archive_slice(descriptor).await {
            Ok(data) => self.archive_to_text(&data),
            Err(err) => {
                tracing::warn!(
                    "Failed to fetch {} @ {}: {}",
                    descriptor.filename,
                    descriptor.offset,
                    err
                );
                String::new()
            }
        }
    }

    /// Downloads the descriptor's byte range and decompresses the gzip
    /// member it contains.
    async fn download_archive_slice(&self, descriptor: &IndexDescriptor) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.config.data_prefix, descriptor.filename);
        let last_byte = descriptor.offset + descriptor.length.saturating_sub(1);
        let range = format!("bytes={}-{}", descriptor.offset, last_byte);

        let response = self.get_with_retry(&url, Some(&range)).await?;
        if !response.status().is_success() {
            anyhow::bail!("Range request failed: {}", response.status());
        }

        let body = response.bytes().await.context("reading archive slice")?;
        let mut decoder = MultiGzDecoder::new(body.as_ref());
        let mut data = Vec::new();
        decoder
            .read_to_end(&mut data)
            .context("decompressing archive slice")?;
        Ok(data)
    }

    /// Queries the remote crawl-index service for descriptors matching a
    /// URL. Unlike the page fetch path, failures here propagate: the caller
    /// decides whether a failed index query is fatal.
    pub async fn download_indices(
        &self,
        url: &str,
        collection: &str,
    ) -> Result<Vec<IndexDescriptor>> {
        let endpoint = format!("{}{}", self.config.index_endpoint, collection);
        let response = self
            .client
            .get(&endpoint)
            .query(&[("url", url), ("output", "json")])
            .timeout(self.config.request_timeout)
            .send()
            .await
            .context("index query request")?;

        if !response.status().is_success() {
            anyhow::bail!("Index query failed: {}", response.status());
        }

        let body = response.text().await.context("reading index query response")?;
        Ok(parse_index_lines(&body))
    }

    /// Strips archive and HTTP headers (everything before the HTML payload)
    /// plus scripts, styles and markup tags. Whitespace is collapsed so the
    /// result is a single flat text line.
    pub(crate) fn archive_to_text(&self, data: &[u8]) -> String {
        let start = match find_subsequence(data, b"<html") {
            Some(start) => start,
            None => return String::new(),
        };

        let html = String::from_utf8_lossy(&data[start..]);
        let without_blocks = self.block_elements.replace_all(&html, " ");
        let without_tags = self.tags.replace_all(&without_blocks, " ");
        let decoded = decode_entities(&without_tags);

        decoded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    async fn get_with_retry(&self, url: &str, range: Option<&str>) -> Result<reqwest::Response> {
        let attempts = self.config.fetch_attempts.max(1);
        let mut delay_ms = 150u64;

        for attempt in 0..attempts {
            let mut request = self
                .client
                .get(url)
                .timeout(self.config.request_timeout);
            if let Some(range) = range {
                request = request.header(reqwest::header::RANGE, range);
            }

            match request.send().await {
                Ok(response) => return Ok(response),
                Err(err) => {
                    if attempt + 1 == attempts {
                        return Err(anyhow::anyhow!(err));
                    }
                    // Simple jitter to prevent thundering herd
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(anyhow::anyhow!("Retry attempts exhausted"))
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}
