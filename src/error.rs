//! Error type for a harvest run and its process exit codes

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code when the output path cannot be prepared
pub const EXIT_OUTPUT_PATH: u8 = 3;
/// Exit code when reading back or writing the output file fails
pub const EXIT_WRITE: u8 = 4;

/// Failures that abort a harvest run.
///
/// Problems confined to a single source or record never show up here; they
/// are logged and skipped.
#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("output path {path:?} is unusable: {source}")]
    OutputPath {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read existing proxies from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write proxies to {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read source list {path:?}: {source}")]
    SourceList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Client(#[from] reqwest::Error),
}

impl HarvestError {
    /// Process exit code reported for this failure
    pub fn exit_code(&self) -> u8 {
        match self {
            HarvestError::OutputPath { .. } => EXIT_OUTPUT_PATH,
            HarvestError::Read { .. } | HarvestError::Write { .. } => EXIT_WRITE,
            HarvestError::SourceList { .. } | HarvestError::Client(_) => 1,
        }
    }
}
