//! Proxy data models

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Field names scraped sources commonly expose
pub const FIELD_IP_ADDRESS: &str = "ip address";
pub const FIELD_IP: &str = "ip";
pub const FIELD_PORT: &str = "port";
pub const FIELD_HTTPS: &str = "https";

/// Protocol selection applied to scraped records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProxyKind {
    /// Records whose `https` column says `no`
    Http,
    /// Records whose `https` column says `yes`
    #[default]
    Https,
    /// Every record, regardless of the `https` column
    All,
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProxyKind::Http => write!(f, "http"),
            ProxyKind::Https => write!(f, "https"),
            ProxyKind::All => write!(f, "all"),
        }
    }
}

/// One scraped table row or text line.
///
/// Keys are lower-cased column names. Which keys exist depends entirely on the
/// source the record came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record by zipping header names with cell values
    pub fn from_columns<H, V>(headers: H, values: V) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let fields = headers
            .into_iter()
            .map(Into::into)
            .zip(values.into_iter().map(Into::into))
            .collect();
        Self { fields }
    }

    /// Minimal `{ip, port}` record used by line lists and irregular table rows
    pub fn ip_port(ip: impl Into<String>, port: impl Into<String>) -> Self {
        Self::new().with(FIELD_IP, ip).with(FIELD_PORT, port)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

/// A validated `ip:port` pair.
///
/// Ordering and equality are those of the underlying string, so collections of
/// entries sort lexicographically (`10.0.0.1:80` before `9.0.0.1:80`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProxyEntry(String);

impl ProxyEntry {
    /// Only the validator constructs entries from scraped data
    pub(crate) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    /// Wrap a line read back from a previously written output file
    pub(crate) fn from_persisted(line: &str) -> Self {
        Self(line.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProxyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProxyEntry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Deduplicated, lexicographically ordered set of entries
pub type ProxySet = BTreeSet<ProxyEntry>;
