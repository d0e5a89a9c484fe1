//! Proxy crawler module for fetching proxy lists from websites
//!
//! This module provides functionality for:
//! - Fetching source pages with a browser-like client and a fixed timeout
//! - Dispatching each page to the parsing strategy registered for its URL
//! - Accumulating raw records across sources while tolerating failed sources

use crate::error::HarvestError;
use crate::proxy::models::RawRecord;
use crate::proxy::sources::{ProxySource, SourceRegistry};
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default number of sources fetched at the same time
const DEFAULT_CONCURRENCY: usize = 4;

/// Default user agent; proxy list sites reject bare clients
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:109.0) Gecko/20100101 Firefox/115.0";

/// Result of crawling a single source
#[derive(Debug, Clone)]
pub struct CrawlResult {
    /// URL of the source that was crawled
    pub source: String,
    /// Records extracted from the source
    pub records: Vec<RawRecord>,
    /// Error message if fetching failed
    pub error: Option<String>,
}

impl CrawlResult {
    /// Create a successful crawl result
    pub fn success(source: String, records: Vec<RawRecord>) -> Self {
        Self {
            source,
            records,
            error: None,
        }
    }

    /// Create a failed crawl result
    pub fn failure(source: String, error: String) -> Self {
        Self {
            source,
            records: Vec::new(),
            error: Some(error),
        }
    }

    /// Check if the crawl was successful
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Everything scraped in one run, before validation
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Raw records from all successful sources, in source order
    pub records: Vec<RawRecord>,
    /// Number of records scraped across all sources
    pub total_scraped: usize,
    /// Sources that could not be fetched
    pub failed_sources: Vec<String>,
}

impl CrawlReport {
    /// Fold per-source results into one report
    pub fn from_results(results: Vec<CrawlResult>) -> Self {
        let mut report = Self::default();
        for result in results {
            if result.is_success() {
                report.total_scraped += result.records.len();
                report.records.extend(result.records);
            } else {
                report.failed_sources.push(result.source);
            }
        }
        report
    }
}

/// Configuration for proxy crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Timeout for HTTP requests
    pub timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: String,
    /// Maximum number of sources fetched concurrently
    pub concurrency: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl CrawlerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

/// Proxy crawler for fetching raw proxy records from websites
pub struct ProxyCrawler {
    config: CrawlerConfig,
    client: Client,
    registry: SourceRegistry,
}

impl ProxyCrawler {
    /// Create a new proxy crawler with default configuration
    pub fn new() -> Result<Self, HarvestError> {
        Self::with_config(CrawlerConfig::default())
    }

    /// Create a new proxy crawler with custom configuration
    pub fn with_config(config: CrawlerConfig) -> Result<Self, HarvestError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            config,
            client,
            registry: SourceRegistry::default(),
        })
    }

    /// Replace the source registry used to pick parsers
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Fetch the body of `url`. Network errors, timeouts and non-2xx statuses
    /// are all reported as `Err` with a readable message.
    pub async fn fetch(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(describe_error)?;
        let body = response.text().await.map_err(describe_error)?;
        info!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Parse fetched content with the strategy registered for `url`
    pub fn extract(&self, url: &str, content: &str) -> Vec<RawRecord> {
        let format = self.registry.select(url);
        debug!("Parsing {} as {:?}", url, format);
        format.parse(content)
    }

    /// Fetch and parse a single source
    pub async fn crawl_source(&self, source: &ProxySource) -> CrawlResult {
        match self.fetch(&source.url).await {
            Ok(content) => {
                let records = self.extract(&source.url, &content);
                info!("Scraped {} records from {}", records.len(), source.url);
                CrawlResult::success(source.url.clone(), records)
            }
            Err(error) => {
                warn!("Failed to fetch {}: {}", source.url, error);
                CrawlResult::failure(source.url.clone(), error)
            }
        }
    }

    /// Fetch and parse every source, returning results in source order.
    ///
    /// Up to `concurrency` fetches run at once. A failed source never stops
    /// the others.
    pub async fn crawl_sources_with_results(&self, sources: &[ProxySource]) -> Vec<CrawlResult> {
        stream::iter(sources)
            .map(|source| self.crawl_source(source))
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await
    }

    /// Crawl all sources and merge their records into one report
    pub async fn crawl(&self, sources: &[ProxySource]) -> CrawlReport {
        let report = CrawlReport::from_results(self.crawl_sources_with_results(sources).await);
        if !report.failed_sources.is_empty() {
            warn!(
                "{} of {} sources failed",
                report.failed_sources.len(),
                sources.len()
            );
        }
        report
    }
}

fn describe_error(error: reqwest::Error) -> String {
    if error.is_timeout() {
        format!("timed out: {}", error)
    } else {
        error.to_string()
    }
}
