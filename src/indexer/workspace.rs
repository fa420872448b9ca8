//! Finds `.ts` files under a directory and loads them into a [`CatalogSet`].
use std::path::{
    Path,
    PathBuf,
};

use futures::stream::{
    self,
    StreamExt,
};
use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;

use crate::catalog::{
    Catalog,
    CatalogSet,
    DuplicatePolicy,
};
use crate::config::{
    CatalogSettings,
    LoadErrorPolicy,
};
use crate::indexer::types::IndexerError;

/// Loads catalog directories according to [`CatalogSettings`].
#[derive(Clone, Debug, Default)]
pub struct CatalogIndexer {
    settings: CatalogSettings,
}

impl CatalogIndexer {
    #[must_use]
    pub const fn new(settings: CatalogSettings) -> Self {
        Self { settings }
    }

    #[must_use]
    pub const fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Loads every catalog file under `dir`.
    ///
    /// Files are parsed concurrently, at most `loading.numThreads` at a time,
    /// and inserted in path order so the result does not depend on timing.
    ///
    /// Matched files whose root element is not `<TS>`, such as TypeScript
    /// sources picked up by the default `**/*.ts` pattern, are ignored under
    /// either `onLoadError` policy.
    ///
    /// # Errors
    /// - Invalid file or exclude pattern
    /// - A file fails to read or parse and `onLoadError` is `abort`
    pub async fn load_dir(&self, dir: &Path) -> Result<CatalogSet, IndexerError> {
        tracing::debug!(dir = %dir.display(), "Loading catalog directory");

        let files = self.find_catalog_files(dir)?;
        let policy = self.settings.duplicate_keys;
        let concurrency = self.settings.loading.concurrency();

        let results: Vec<(PathBuf, Result<Option<Catalog>, IndexerError>)> = stream::iter(files)
            .map(|path| async move {
                let result = load_file(&path, policy).await;
                (path, result)
            })
            .buffered(concurrency)
            .collect()
            .await;

        let mut set = CatalogSet::new().with_fallback_locales(self.settings.fallback_locales());
        for (path, result) in results {
            match result {
                Ok(Some(catalog)) => set.insert(catalog),
                Ok(None) => {
                    tracing::debug!(path = %path.display(), "Not a TS catalog, ignoring");
                }
                Err(e) => match self.settings.on_load_error {
                    LoadErrorPolicy::Skip => {
                        tracing::warn!(path = %path.display(), error = %e, "Skipping catalog");
                    }
                    LoadErrorPolicy::Abort => return Err(e),
                },
            }
        }

        tracing::debug!(
            locales = set.locales().len(),
            neutral = set.neutral().len(),
            "Catalog directory loaded"
        );
        Ok(set)
    }

    /// Catalog files under `dir`, sorted by path.
    ///
    /// Patterns are matched against paths relative to `dir`. `.gitignore`
    /// rules are honoured.
    ///
    /// # Errors
    /// Returns [`IndexerError::InvalidPattern`] for an invalid glob.
    pub fn find_catalog_files(&self, dir: &Path) -> Result<Vec<PathBuf>, IndexerError> {
        let include_set = build_glob_set(std::slice::from_ref(&self.settings.file_pattern))?;
        let exclude_set = build_glob_set(&self.settings.exclude_patterns)?;

        let mut found_files = Vec::new();
        for result in WalkBuilder::new(dir)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .build()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(?err, "Failed to read directory entry");
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.path();
            let Ok(relative_path) = path.strip_prefix(dir) else {
                continue;
            };
            if !include_set.is_match(relative_path) || exclude_set.is_match(relative_path) {
                continue;
            }

            found_files.push(path.to_path_buf());
        }

        found_files.sort();
        tracing::debug!(count = found_files.len(), "Found catalog files");
        Ok(found_files)
    }
}

/// Reads and parses one file. `Ok(None)` when the file is not a TS document.
async fn load_file(path: &Path, policy: DuplicatePolicy) -> Result<Option<Catalog>, IndexerError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| IndexerError::Read { path: path.to_path_buf(), source })?;
    if !looks_like_ts_document(&bytes) {
        return Ok(None);
    }
    let content = String::from_utf8(bytes).map_err(|e| IndexerError::Read {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
    })?;

    let path = path.to_path_buf();
    let catalog =
        tokio::task::spawn_blocking(move || Catalog::from_content(&path, &content, policy))
            .await??;
    Ok(Some(catalog))
}

/// Markup whose prolog leads to a `<TS` element. TypeScript sources fail this.
fn looks_like_ts_document(bytes: &[u8]) -> bool {
    let text = String::from_utf8_lossy(bytes);
    let text = text.trim_start_matches('\u{feff}').trim_start();
    text.starts_with('<') && text.contains("<TS")
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, IndexerError> {
    let invalid = |pattern: &str, e: globset::Error| IndexerError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    };

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).map_err(|e| invalid(pattern, e))?);
    }
    builder.build().map_err(|e| invalid(&patterns.join(", "), e))
}
