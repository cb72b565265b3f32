//! Error taxonomy for the scaffolding pipeline.
//!
//! Every variant is fatal: the pipeline stops at the first error and the
//! binary exits non-zero. Only `Configuration` errors are raised before any
//! filesystem mutation, which is why the CLI pairs them with usage help.

use std::path::PathBuf;

/// Result alias used throughout the library.
pub type Result<T, E = ScaffoldError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// Missing target, unknown version key, unreadable config file.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Target or `libs/` directory could not be created.
    #[error("failed to create directory {}", .path.display())]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An asset could not be fetched, copied or written.
    #[error("failed to provision {asset} from {source_location} to {}: {reason}", .dest.display())]
    Provisioning {
        asset: String,
        source_location: String,
        dest: PathBuf,
        reason: String,
    },

    /// The HTTP client for remote mode could not be set up.
    #[error("failed to initialise HTTP client: {reason}")]
    HttpClient { reason: String },

    /// A template was missing or the rendered file could not be written.
    #[error("failed to render {}: {reason}", .path.display())]
    Render { path: PathBuf, reason: String },

    /// The static server could not bind its listener.
    #[error("failed to start server on {addr}")]
    Server {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScaffoldError {
    /// True for errors raised before anything touched the filesystem.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ScaffoldError::Configuration(_))
    }
}
