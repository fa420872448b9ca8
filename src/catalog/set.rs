//! Locale-keyed collection of catalogs

use std::collections::{
    BTreeSet,
    HashMap,
};

use super::Catalog;
use crate::error::CatalogError;
use crate::locale::Locale;

/// Catalogs grouped by locale, plus locale-neutral catalogs.
///
/// Several catalogs may target one locale (one per plugin, for instance);
/// they are searched in insertion order. Neutral catalogs, such as icon
/// tables, are consulted for every locale after its own catalogs.
#[derive(Debug, Clone, Default)]
pub struct CatalogSet {
    catalogs: HashMap<Locale, Vec<Catalog>>,
    neutral: Vec<Catalog>,
    /// Locales tried after the requested one, in order
    fallback_locales: Vec<Locale>,
}

impl CatalogSet {
    /// Creates an empty set without fallback locales.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the locales tried when the requested locale has no translation.
    #[must_use]
    pub fn with_fallback_locales(mut self, fallback_locales: Vec<Locale>) -> Self {
        self.fallback_locales = fallback_locales;
        self
    }

    /// Adds a catalog under its own locale, or as neutral if it has none.
    pub fn insert(&mut self, catalog: Catalog) {
        match catalog.locale().cloned() {
            Some(locale) => self.catalogs.entry(locale).or_default().push(catalog),
            None => self.neutral.push(catalog),
        }
    }

    #[must_use]
    pub fn fallback_locales(&self) -> &[Locale] {
        &self.fallback_locales
    }

    /// Locales with at least one catalog, sorted.
    #[must_use]
    pub fn locales(&self) -> Vec<&Locale> {
        let mut locales: Vec<_> = self.catalogs.keys().collect();
        locales.sort();
        locales
    }

    /// Catalogs loaded for exactly `locale`.
    #[must_use]
    pub fn catalogs(&self, locale: &Locale) -> &[Catalog] {
        self.catalogs.get(locale).map(Vec::as_slice).unwrap_or_default()
    }

    /// Catalogs without a locale.
    #[must_use]
    pub fn neutral(&self) -> &[Catalog] {
        &self.neutral
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty() && self.neutral.is_empty()
    }

    /// `locale`, its language-only locale, then the other loaded locales of
    /// that language, sorted. `fr` expands to `fr, fr_FR` when only a
    /// `fr_FR` catalog is loaded.
    #[must_use]
    pub fn language_family(&self, locale: &Locale) -> Vec<Locale> {
        let mut family = vec![locale.clone()];
        family.extend(locale.language_only());
        for sibling in self.locales() {
            if sibling.language() == locale.language() && !family.contains(sibling) {
                family.push(sibling.clone());
            }
        }
        family
    }

    /// Catalogs of every locale in the language family of `locale`.
    #[must_use]
    pub fn family_catalogs(&self, locale: &Locale) -> Vec<&Catalog> {
        self.language_family(locale).iter().flat_map(|l| self.catalogs(l)).collect()
    }

    /// Locales searched for `locale`, in order.
    ///
    /// The language family of `locale`, then that of each fallback.
    /// Duplicates are dropped.
    #[must_use]
    pub fn resolution_chain(&self, locale: &Locale) -> Vec<Locale> {
        let mut chain = Vec::new();
        for requested in std::iter::once(locale).chain(&self.fallback_locales) {
            for candidate in self.language_family(requested) {
                if !chain.contains(&candidate) {
                    chain.push(candidate);
                }
            }
        }
        chain
    }

    /// Usable translation of `key` for `locale`, following the resolution chain.
    #[must_use]
    pub fn get(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.resolution_chain(locale)
            .iter()
            .find_map(|candidate| self.get_exact(candidate, key))
            .or_else(|| self.neutral.iter().find_map(|catalog| catalog.get(key)))
    }

    /// Translation of `key` for `locale`, or `key` itself when untranslated.
    #[must_use]
    pub fn lookup<'a>(&'a self, locale: &Locale, key: &'a str) -> &'a str {
        self.get(locale, key).unwrap_or(key)
    }

    /// Translation of `key` for `locale`, or `default` when untranslated.
    #[must_use]
    pub fn lookup_or<'a>(&'a self, locale: &Locale, key: &str, default: &'a str) -> &'a str {
        self.get(locale, key).unwrap_or(default)
    }

    /// Translation of `key` for `locale`, or [`CatalogError::MissingTranslation`].
    ///
    /// # Errors
    /// Returns `MissingTranslation` when no locale in the chain translates `key`.
    pub fn require(&self, locale: &Locale, key: &str) -> Result<&str, CatalogError> {
        self.get(locale, key).ok_or_else(|| CatalogError::MissingTranslation {
            locale: locale.to_string(),
            key: key.to_string(),
        })
    }

    /// Keys translated for `reference` that `target` cannot resolve on its own.
    ///
    /// Both locales are expanded to their language family, so `fr` covers a
    /// `fr_FR` catalog. Fallback locales are not consulted: a key that only a
    /// fallback would serve still counts as missing.
    #[must_use]
    pub fn missing_keys(&self, reference: &Locale, target: &Locale) -> Vec<String> {
        let own = self.language_family(target);

        let reference_keys: BTreeSet<&str> =
            self.family_catalogs(reference).into_iter().flat_map(Catalog::keys).collect();

        reference_keys
            .into_iter()
            .filter(|key| !own.iter().any(|locale| self.get_exact(locale, key).is_some()))
            .map(ToString::to_string)
            .collect()
    }

    /// Translation from the catalogs of exactly `locale`.
    fn get_exact(&self, locale: &Locale, key: &str) -> Option<&str> {
        self.catalogs(locale).iter().find_map(|catalog| catalog.get(key))
    }
}
