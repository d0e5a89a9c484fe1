//! Proxy sources and the registry that picks a parsing strategy per source

use crate::error::HarvestError;
use crate::proxy::models::RawRecord;
use crate::proxy::parser;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Element id of the proxy table on proxy-list.download
pub const PROXY_LIST_DOWNLOAD_TABLE_ID: &str = "tblproxy";

/// Free proxy lists scraped when no other sources are configured
pub const DEFAULT_SOURCE_URLS: &[&str] = &[
    "https://free-proxy-list.net/",
    "https://www.sslproxies.org/",
    "https://www.us-proxy.org/",
    "https://www.proxy-list.download/http",
    "https://www.proxy-list.download/https",
    "https://raw.githubusercontent.com/TheSpeedX/PROXY-List/master/http.txt",
];

/// How the content of a source is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceFormat {
    /// free-proxy-list.net
    FreeProxyList,
    /// sslproxies.org
    SslProxies,
    /// us-proxy.org
    UsProxy,
    /// A table identified by its element id
    TableById(String),
    /// Plain `IP:PORT` lines
    RawList,
    /// The first HTML table on the page
    GenericTable,
}

impl SourceFormat {
    /// Parse fetched content into raw records. Never fails; unusable content
    /// yields no records.
    pub fn parse(&self, content: &str) -> Vec<RawRecord> {
        match self {
            // These sites all serve the same table layout today.
            SourceFormat::FreeProxyList
            | SourceFormat::SslProxies
            | SourceFormat::UsProxy
            | SourceFormat::GenericTable => parser::parse_table(content),
            SourceFormat::TableById(id) => match parser::table_selector_by_id(id) {
                Some(selector) => parser::parse_table_matching(content, &selector),
                None => {
                    warn!("Unusable table id {:?}", id);
                    Vec::new()
                }
            },
            SourceFormat::RawList => parser::parse_lines(content),
        }
    }
}

/// A page or text endpoint believed to list proxies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySource {
    /// URL to fetch proxies from
    pub url: String,
}

impl ProxySource {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }

    /// The built-in list of free proxy sources
    pub fn defaults() -> Vec<ProxySource> {
        DEFAULT_SOURCE_URLS.iter().map(|url| Self::new(url)).collect()
    }

    /// Parse a URL list with one URL per line. Blank lines and `#` comments
    /// are skipped.
    pub fn parse_list(content: &str) -> Vec<ProxySource> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Self::new)
            .collect()
    }

    /// Read a URL list from a file
    pub fn load_list(path: &Path) -> Result<Vec<ProxySource>, HarvestError> {
        let content = fs::read_to_string(path).map_err(|source| HarvestError::SourceList {
            path: path.to_path_buf(),
            source,
        })?;
        let sources = Self::parse_list(&content);
        info!("Loaded {} URLs from {}", sources.len(), path.display());
        Ok(sources)
    }
}

/// Ordered mapping from a domain substring to the format of that domain's pages.
///
/// Matching is by substring containment against the whole URL, so scheme and
/// path variations still select the right strategy. An unrelated URL that
/// happens to contain a registered substring will match it too.
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    entries: Vec<(String, SourceFormat)>,
    fallback: SourceFormat,
}

impl SourceRegistry {
    /// An empty registry; every URL resolves to [`SourceFormat::GenericTable`]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
            fallback: SourceFormat::GenericTable,
        }
    }

    /// Register `domain` after all existing entries
    pub fn with_entry(mut self, domain: &str, format: SourceFormat) -> Self {
        self.entries.push((domain.to_string(), format));
        self
    }

    /// First registered format whose domain occurs in `url`, else the generic table
    pub fn select(&self, url: &str) -> &SourceFormat {
        self.entries
            .iter()
            .find(|(domain, _)| url.contains(domain.as_str()))
            .map(|(_, format)| format)
            .unwrap_or(&self.fallback)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::empty()
            .with_entry("free-proxy-list.net", SourceFormat::FreeProxyList)
            .with_entry("sslproxies.org", SourceFormat::SslProxies)
            .with_entry("us-proxy.org", SourceFormat::UsProxy)
            .with_entry(
                "proxy-list.download",
                SourceFormat::TableById(PROXY_LIST_DOWNLOAD_TABLE_ID.to_string()),
            )
            .with_entry("raw.githubusercontent.com", SourceFormat::RawList)
    }
}
