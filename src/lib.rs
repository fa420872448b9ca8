//! ts-catalog
//!
//! Loads Qt Linguist `.ts` translation catalogs and looks up localized
//! strings with an explicit fallback.

pub mod bundled;
pub mod catalog;
pub mod config;
pub mod error;
pub mod hypothesis;
pub mod indexer;
pub mod locale;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use catalog::{
    Catalog,
    CatalogSet,
    DuplicatePolicy,
    Message,
};
pub use error::CatalogError;
pub use locale::Locale;
