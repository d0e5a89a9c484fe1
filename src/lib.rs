//! Proxy Harvester - free proxy list scraper
//!
//! Scrapes public "free proxy" pages and text lists, keeps the syntactically
//! valid `ip:port` pairs of the requested protocol, and merges them into a
//! sorted, deduplicated text file.

pub mod console;
pub mod error;
pub mod harvest;
pub mod logging;
pub mod proxy;

pub use error::HarvestError;
pub use harvest::{run, HarvestSummary};
pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;

/// Application configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Which protocol to keep
    pub proxy_kind: ProxyKind,
    /// Output file or directory, as given by the user
    pub output: String,
    /// Sources to scrape, in order
    pub sources: Vec<ProxySource>,
    /// HTTP settings for fetching sources
    pub crawler: CrawlerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_kind: ProxyKind::default(),
            output: store::DEFAULT_OUTPUT_FILE.to_string(),
            sources: ProxySource::defaults(),
            crawler: CrawlerConfig::default(),
        }
    }
}
