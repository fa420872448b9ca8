//! Catalog error definitions

use thiserror::Error;

use crate::types::SourcePosition;

/// Errors raised while loading, querying or writing translation catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The document does not follow the `TS` schema.
    #[error(
        "Malformed resource{}: {message} (line {}, column {})",
        format_path(.path.as_deref()),
        .position.line + 1,
        .position.character + 1
    )]
    MalformedResource {
        /// File the document was read from, if any
        path: Option<String>,
        /// Where the problem was detected
        position: SourcePosition,
        message: String,
    },

    /// A key was defined twice within one context.
    #[error(
        "Duplicate key '{key}' in context '{context}'{} (line {}, first defined on line {})",
        format_path(.path.as_deref()),
        .position.line + 1,
        .first.line + 1
    )]
    DuplicateKey {
        /// File the document was read from, if any
        path: Option<String>,
        context: String,
        key: String,
        /// Position of the repeated definition
        position: SourcePosition,
        /// Position of the first definition
        first: SourcePosition,
    },

    /// The requested key has no usable entry for the locale.
    #[error("No translation for '{key}' in locale '{locale}'")]
    MissingTranslation { locale: String, key: String },

    /// Error when failing to read a resource file
    #[error("Failed to read resource: {0}")]
    Io(#[from] std::io::Error),

    /// Error when failing to serialize a catalog
    #[error("Failed to write catalog: {0}")]
    Write(String),
}

impl CatalogError {
    /// Attaches the file path to parse errors that were raised without one.
    #[must_use]
    pub fn with_path(mut self, file_path: &str) -> Self {
        match &mut self {
            Self::MalformedResource { path, .. } | Self::DuplicateKey { path, .. } => {
                if path.is_none() {
                    *path = Some(file_path.to_string());
                }
            }
            Self::MissingTranslation { .. } | Self::Io(_) | Self::Write(_) => {}
        }
        self
    }

    /// Returns true if the error is a recoverable lookup miss.
    #[must_use]
    pub const fn is_missing_translation(&self) -> bool {
        matches!(self, Self::MissingTranslation { .. })
    }
}

/// Formats an optional path as a ` in '<path>'` suffix.
fn format_path(path: Option<&str>) -> String {
    path.map_or_else(String::new, |p| format!(" in '{p}'"))
}
