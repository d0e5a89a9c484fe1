//! Entry validation and protocol filtering

use crate::proxy::models::{
    ProxyEntry, ProxyKind, RawRecord, FIELD_HTTPS, FIELD_IP, FIELD_IP_ADDRESS, FIELD_PORT,
};
use tracing::debug;

const MAX_OCTET: u32 = 255;
const MAX_PORT: u32 = 65535;
const OCTET_COUNT: usize = 4;

/// Validate a scraped record and canonicalize it to `ip:port`.
///
/// The IP is read from `ip address`, falling back to `ip`. Octets and port are
/// kept exactly as scraped; no zero-padding is added or removed.
pub fn validate(record: &RawRecord) -> Option<ProxyEntry> {
    let ip = record
        .get(FIELD_IP_ADDRESS)
        .filter(|ip| !ip.is_empty())
        .or_else(|| record.get(FIELD_IP))?;
    let port = record.get(FIELD_PORT)?;

    if ip.is_empty() || port.is_empty() {
        return None;
    }
    if !is_valid_port(port) || !is_valid_ipv4(ip) {
        return None;
    }

    Some(ProxyEntry::new_unchecked(format!("{}:{}", ip, port)))
}

/// Keep records matching `kind` and validate them, preserving input order.
///
/// Duplicates survive this stage; the store deduplicates on merge.
pub fn filter(records: &[RawRecord], kind: ProxyKind) -> Vec<ProxyEntry> {
    records
        .iter()
        .filter(|record| matches_kind(record, kind))
        .filter_map(|record| {
            let entry = validate(record);
            if entry.is_none() {
                debug!("Dropping invalid record: {:?}", record);
            }
            entry
        })
        .collect()
}

fn matches_kind(record: &RawRecord, kind: ProxyKind) -> bool {
    match kind {
        ProxyKind::All => true,
        ProxyKind::Https => record.get(FIELD_HTTPS) == Some("yes"),
        ProxyKind::Http => record.get(FIELD_HTTPS) == Some("no"),
    }
}

fn parse_bounded(digits: &str, max: u32) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|n| *n <= max)
}

fn is_valid_port(port: &str) -> bool {
    matches!(parse_bounded(port, MAX_PORT), Some(p) if p >= 1)
}

fn is_valid_ipv4(ip: &str) -> bool {
    let parts: Vec<&str> = ip.split('.').collect();
    parts.len() == OCTET_COUNT
        && parts
            .iter()
            .all(|part| parse_bounded(part, MAX_OCTET).is_some())
}
