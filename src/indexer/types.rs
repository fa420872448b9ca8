//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::error::CatalogError;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// `filePattern` or an exclude pattern is not a valid glob
    #[error("Invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
    /// A catalog file could not be read
    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A parsing task panicked or was cancelled
    #[error("Catalog parsing task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
