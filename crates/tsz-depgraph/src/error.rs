//! Error kinds surfaced by the dependency graph core.

use std::path::PathBuf;

/// Errors that can escape a public [`crate::DependencyGraph`] operation.
#[derive(Debug, thiserror::Error)]
pub enum DepGraphError {
    /// Re-entry into the one-shot `initialize` step.
    #[error("dependency graph was already initialized")]
    AlreadyInitialized,

    /// The dependency extractor failed for a specific file.
    #[error("dependency extraction failed for {path}")]
    ExtractorFailure {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// Persisting or loading a cache file failed.
    #[error("cache I/O failed for {path}")]
    CacheIOFailure {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// A provided entry-file path could not be made absolute against `cwd`.
    #[error("cannot resolve path {path} to an absolute path")]
    InvalidPath { path: String },
}

pub type Result<T> = std::result::Result<T, DepGraphError>;
