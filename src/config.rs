//! Runtime Configuration
//!
//! Typed configuration for the server binary and the pipeline. Every value
//! has a default and can be overridden through `CITYGRAPH_*` environment
//! variables, so a bare `citygraph` start works against the public crawl
//! archive endpoints.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the gathering layer (index retrieval and page fetch).
#[derive(Debug, Clone)]
pub struct GatheringConfig {
    /// Base URL prefixed to a descriptor's `filename` for ranged fetches.
    pub data_prefix: String,
    /// Base URL of the remote crawl-index query service.
    pub index_endpoint: String,
    /// Timeout applied to every outbound network call.
    pub request_timeout: Duration,
    /// Attempts per fetch. 1 means no retry; higher values enable the
    /// backoff-with-jitter retry helper.
    pub fetch_attempts: usize,
}

impl Default for GatheringConfig {
    fn default() -> Self {
        Self {
            data_prefix: "https://data.commoncrawl.org/".to_string(),
            index_endpoint: "https://index.commoncrawl.org/".to_string(),
            request_timeout: Duration::from_secs(10),
            fetch_attempts: 1,
        }
    }
}

/// Configuration for the worker pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of accumulated results a consumer holds before flushing a
    /// batch to storage.
    pub commit_threshold: usize,
    /// How long a consumer waits between polls of an empty queue.
    pub poll_interval: Duration,
    /// Pages with more distinct place mentions than this are treated as
    /// low-signal (directory listings) and discarded.
    pub max_occurrences: usize,
    /// Default probability threshold for category selection.
    pub category_threshold: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            commit_threshold: 20,
            poll_interval: Duration::from_millis(100),
            max_occurrences: 25,
            category_threshold: 0.4,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub gathering: GatheringConfig,
    pub pipeline: PipelineConfig,
    /// Optional file with one place name per line. When absent, the built-in
    /// vocabulary is used.
    pub places_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:6060".parse().expect("static default address"),
            gathering: GatheringConfig::default(),
            pipeline: PipelineConfig::default(),
            places_file: None,
        }
    }
}

impl AppConfig {
    /// Builds the configuration from environment variables, falling back to
    /// defaults for anything unset. Malformed values are errors, not
    /// silently ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("CITYGRAPH_BIND") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid CITYGRAPH_BIND value: {}", addr))?;
        }
        if let Ok(prefix) = std::env::var("CITYGRAPH_DATA_PREFIX") {
            config.gathering.data_prefix = prefix;
        }
        if let Ok(endpoint) = std::env::var("CITYGRAPH_INDEX_ENDPOINT") {
            config.gathering.index_endpoint = endpoint;
        }
        if let Ok(secs) = std::env::var("CITYGRAPH_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("invalid CITYGRAPH_REQUEST_TIMEOUT_SECS: {}", secs))?;
            config.gathering.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(attempts) = std::env::var("CITYGRAPH_FETCH_ATTEMPTS") {
            config.gathering.fetch_attempts = attempts
                .parse()
                .with_context(|| format!("invalid CITYGRAPH_FETCH_ATTEMPTS: {}", attempts))?;
        }
        if let Ok(threshold) = std::env::var("CITYGRAPH_COMMIT_THRESHOLD") {
            config.pipeline.commit_threshold = threshold
                .parse()
                .with_context(|| format!("invalid CITYGRAPH_COMMIT_THRESHOLD: {}", threshold))?;
        }
        if let Ok(cap) = std::env::var("CITYGRAPH_MAX_OCCURRENCES") {
            config.pipeline.max_occurrences = cap
                .parse()
                .with_context(|| format!("invalid CITYGRAPH_MAX_OCCURRENCES: {}", cap))?;
        }
        if let Ok(threshold) = std::env::var("CITYGRAPH_CATEGORY_THRESHOLD") {
            config.pipeline.category_threshold = threshold
                .parse()
                .with_context(|| format!("invalid CITYGRAPH_CATEGORY_THRESHOLD: {}", threshold))?;
        }
        if let Ok(path) = std::env::var("CITYGRAPH_PLACES_FILE") {
            config.places_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}
