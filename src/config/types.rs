use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::catalog::DuplicatePolicy;
use crate::locale::Locale;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// What directory loading does with a file that fails to read or parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadErrorPolicy {
    /// Log a warning and leave the file out.
    #[default]
    Skip,
    /// Fail the whole load.
    Abort,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    /// Glob selecting catalog files, relative to the catalog directory.
    pub file_pattern: String,
    pub exclude_patterns: Vec<String>,

    /// Locales tried, in order, when the requested locale has no translation.
    pub fallback_locales: Vec<String>,

    pub duplicate_keys: DuplicatePolicy,
    pub on_load_error: LoadErrorPolicy,

    pub loading: LoadingConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LoadingConfig {
    /// Number of files parsed concurrently.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl LoadingConfig {
    /// Effective concurrency: the configured value or 80% of CPU cores.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl CatalogSettings {
    /// # Errors
    /// - Empty or invalid glob pattern
    /// - Unparsable fallback locale
    /// - Zero thread count
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "filePattern",
                "The pattern cannot be empty. Example: \"**/*.ts\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.file_pattern) {
            errors.push(ValidationError::new(
                "filePattern",
                format!("Invalid glob pattern '{}': {e}", self.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        for (index, tag) in self.fallback_locales.iter().enumerate() {
            if let Err(e) = Locale::parse(tag) {
                errors.push(ValidationError::new(format!("fallbackLocales[{index}]"), e.to_string()));
            }
        }

        if self.loading.num_threads == Some(0) {
            errors.push(ValidationError::new(
                "loading.numThreads",
                "The thread count must be at least 1, or remove this field to use the default",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Parsed fallback locales; entries that fail to parse are skipped.
    #[must_use]
    pub fn fallback_locales(&self) -> Vec<Locale> {
        self.fallback_locales.iter().filter_map(|tag| Locale::parse(tag).ok()).collect()
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            file_pattern: "**/*.ts".to_string(),
            exclude_patterns: Vec::new(),
            fallback_locales: vec!["en".to_string()],
            duplicate_keys: DuplicatePolicy::default(),
            on_load_error: LoadErrorPolicy::default(),
            loading: LoadingConfig::default(),
        }
    }
}
