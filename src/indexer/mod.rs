//! Catalog discovery and loading from a directory
mod types;
mod workspace;

pub use types::IndexerError;
pub use workspace::CatalogIndexer;
