//! One complete harvest: crawl, filter, merge into the output file

use crate::error::HarvestError;
use crate::proxy::{store, validator, ProxyCrawler, ProxyKind};
use crate::Config;
use std::path::PathBuf;
use tracing::info;

/// Counts reported at the end of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Records scraped across all reachable sources
    pub total_scraped: usize,
    /// Records that passed the type filter and validation
    pub valid: usize,
    /// Sources that could not be fetched
    pub failed_sources: usize,
    pub proxy_kind: ProxyKind,
    /// Resolved output file
    pub output: PathBuf,
    /// Entries new to the output file
    pub added: usize,
    /// Entries in the output file after the run
    pub total: usize,
}

/// Run a full harvest with `config`.
///
/// Only problems with the output file or the HTTP client abort the run.
pub async fn run(config: &Config) -> Result<HarvestSummary, HarvestError> {
    info!(
        "Starting harvest (type={}, output={})",
        config.proxy_kind, config.output
    );
    let output = store::resolve_output_path(&config.output)?;

    let crawler = ProxyCrawler::with_config(config.crawler.clone())?;
    let report = crawler.crawl(&config.sources).await;

    let valid = validator::filter(&report.records, config.proxy_kind);
    let outcome = store::persist(&valid, &output)?;

    info!(
        "Scraping complete: total scraped {}, valid {}",
        report.total_scraped,
        valid.len()
    );

    Ok(HarvestSummary {
        total_scraped: report.total_scraped,
        valid: valid.len(),
        failed_sources: report.failed_sources.len(),
        proxy_kind: config.proxy_kind,
        output,
        added: outcome.added,
        total: outcome.total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::CrawlerConfig;
    use std::fs;
    use std::time::Duration;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_run_without_sources_creates_empty_file() {
        let dir = tempdir().unwrap();
        let config = Config {
            proxy_kind: ProxyKind::All,
            output: dir.path().to_str().unwrap().to_string(),
            sources: Vec::new(),
            crawler: CrawlerConfig::new().with_timeout(Duration::from_secs(1)),
        };

        let summary = run(&config).await.unwrap();
        assert_eq!(summary.total_scraped, 0);
        assert_eq!(summary.valid, 0);
        assert_eq!(summary.total, 0);
        assert!(summary.output.ends_with("proxies.txt"));
        assert_eq!(fs::read_to_string(&summary.output).unwrap(), "");
    }

    #[tokio::test]
    async fn test_run_bad_output_path() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let config = Config {
            output: blocker.join("proxies.txt").to_str().unwrap().to_string(),
            sources: Vec::new(),
            ..Config::default()
        };

        let err = run(&config).await.unwrap_err();
        assert!(matches!(err, HarvestError::OutputPath { .. }));
    }
}
