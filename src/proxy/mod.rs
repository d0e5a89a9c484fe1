//! Proxy module for harvesting proxies from public lists
//!
//! This module provides functionality for:
//! - Crawling proxy list websites and raw text lists
//! - Parsing HTML tables and `IP:PORT` lines into raw records
//! - Validating records and filtering them by protocol
//! - Merging validated entries into the output file

pub mod crawler;
pub mod models;
pub mod parser;
pub mod sources;
pub mod store;
pub mod validator;

pub use crawler::{CrawlReport, CrawlResult, CrawlerConfig, ProxyCrawler};
pub use models::{ProxyEntry, ProxyKind, ProxySet, RawRecord};
pub use sources::{ProxySource, SourceFormat, SourceRegistry};
pub use store::PersistOutcome;
