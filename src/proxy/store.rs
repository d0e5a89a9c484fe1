//! Output file handling: path preparation and merge-on-write persistence
//!
//! The output file holds one `ip:port` per line, sorted lexicographically,
//! without duplicates or a trailing newline. Each run reads the file once,
//! unions it with the new entries and writes it back. There is no locking,
//! so two runs against the same file race.

use crate::error::HarvestError;
use crate::proxy::models::{ProxyEntry, ProxySet};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};
use tracing::{debug, info};

/// File name used when the output path names a directory
pub const DEFAULT_OUTPUT_FILE: &str = "proxies.txt";

/// Outcome of merging new entries into the output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Entries that were not in the file before
    pub added: usize,
    /// Entries in the file after writing
    pub total: usize,
}

/// Turn a user supplied output path into a writable file path.
///
/// - a leading `~` is expanded to the user's home directory
/// - an existing directory, or a path ending in a separator, gets
///   [`DEFAULT_OUTPUT_FILE`] appended
/// - missing parent directories are created
/// - the file is created empty if absent
pub fn resolve_output_path(raw: &str) -> Result<PathBuf, HarvestError> {
    let mut path =
        expand_home(raw, dirs::home_dir()).ok_or_else(|| HarvestError::OutputPath {
            path: PathBuf::from(raw),
            source: io::Error::new(io::ErrorKind::NotFound, "home directory is unknown"),
        })?;
    if path.is_dir() || raw.ends_with(MAIN_SEPARATOR) || raw.ends_with('/') {
        info!("Output is a directory; using default filename {}", DEFAULT_OUTPUT_FILE);
        path.push(DEFAULT_OUTPUT_FILE);
    }

    let output_error = |source: io::Error| HarvestError::OutputPath {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            info!("Creating directories: {}", parent.display());
            fs::create_dir_all(parent).map_err(output_error)?;
        }
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(output_error)?;

    let resolved = fs::canonicalize(&path).map_err(output_error)?;
    debug!("Resolved output path {} to {}", raw, resolved.display());
    Ok(resolved)
}

/// `None` when `raw` starts with `~` but there is no home directory to expand it to
fn expand_home(raw: &str, home: Option<PathBuf>) -> Option<PathBuf> {
    let rest = match raw.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(['/', MAIN_SEPARATOR]) => rest,
        _ => return Some(PathBuf::from(raw)),
    };
    let rest = rest.trim_start_matches(['/', MAIN_SEPARATOR]);
    home.map(|home| if rest.is_empty() { home } else { home.join(rest) })
}

/// Read the entries already stored at `path`.
///
/// A missing file is treated as empty. Lines are trimmed and blank lines dropped.
pub fn load_existing(path: &Path) -> Result<ProxySet, HarvestError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ProxySet::new()),
        Err(source) => {
            return Err(HarvestError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ProxyEntry::from_persisted)
        .collect())
}

/// Merge `entries` into the file at `path` and write the sorted union back
pub fn persist(entries: &[ProxyEntry], path: &Path) -> Result<PersistOutcome, HarvestError> {
    let existing = load_existing(path)?;
    let fresh: ProxySet = entries.iter().cloned().collect();

    let added = fresh.difference(&existing).count();
    let combined: ProxySet = existing.into_iter().chain(fresh).collect();

    let content = combined
        .iter()
        .map(ProxyEntry::as_str)
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, content).map_err(|source| HarvestError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let outcome = PersistOutcome {
        added,
        total: combined.len(),
    };
    info!(
        "Updated {}: +{} new, total {}",
        path.display(),
        outcome.added,
        outcome.total
    );
    Ok(outcome)
}
