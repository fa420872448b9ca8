//! Locale tags and locale detection from resource file names

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

/// Error returned for strings that are not locale tags.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid locale '{0}': expected a tag such as \"en\", \"fr_FR\" or \"zh-Hans-CN\"")]
pub struct LocaleError(pub String);

/// Normalized locale tag (`language[_Script][_REGION]`).
///
/// `fr-fr`, `FR_FR` and `fr_FR` all normalize to `fr_FR`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale(String);

impl Locale {
    /// Parses and normalizes a locale tag.
    ///
    /// # Errors
    /// Returns [`LocaleError`] if `tag` is not `language[_Script][_REGION]`.
    pub fn parse(tag: &str) -> Result<Self, LocaleError> {
        let invalid = || LocaleError(tag.to_string());

        let mut parts = tag.split(['_', '-']);
        let language = parts.next().filter(|l| is_language_subtag(l)).ok_or_else(invalid)?;
        let mut normalized = language.to_ascii_lowercase();

        let mut seen_script = false;
        let mut seen_region = false;
        for part in parts {
            if !seen_script && !seen_region && part.len() == 4 && is_alpha(part) {
                seen_script = true;
                normalized.push('_');
                normalized.push_str(&title_case(part));
            } else if !seen_region && is_region_subtag(part) {
                seen_region = true;
                normalized.push('_');
                normalized.push_str(&part.to_ascii_uppercase());
            } else {
                return Err(invalid());
            }
        }

        Ok(Self(normalized))
    }

    /// `en`, the source language of Qt resources.
    #[must_use]
    pub fn english() -> Self {
        Self("en".to_string())
    }

    /// The normalized tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`fr` for `fr_FR`).
    #[must_use]
    pub fn language(&self) -> &str {
        self.0.split('_').next().unwrap_or(&self.0)
    }

    /// Language-only locale, or `None` if this locale already is one.
    #[must_use]
    pub fn language_only(&self) -> Option<Self> {
        let language = self.language();
        (language.len() != self.0.len()).then(|| Self(language.to_string()))
    }

    /// Detects a locale from a Qt-style resource file name.
    ///
    /// Qt resources are named `<prefix>_<ll>[_<RR>].ts`. The language subtag
    /// must be two lowercase letters and the region two uppercase letters, so
    /// that words such as `msg` or `images` are not taken for locales.
    ///
    /// # Examples
    /// - `NETGENPlugin_msg_fr.ts` → `fr`
    /// - `app_pt_BR.ts` → `pt_BR`
    /// - `NETGENPlugin_images.ts` → `None`
    #[must_use]
    pub fn detect_from_path(file_path: &Path) -> Option<Self> {
        let stem = file_path.file_stem()?.to_string_lossy();
        let segments: Vec<&str> = stem.split(['_', '-']).collect();

        if let [.., language, region] = segments.as_slice()
            && is_file_language(language)
            && region.len() == 2
            && region.chars().all(|c| c.is_ascii_uppercase())
        {
            return Some(Self(format!("{language}_{region}")));
        }

        segments
            .last()
            .filter(|language| is_file_language(language))
            .map(|language| Self((*language).to_string()))
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `true` for 2-3 ASCII letters.
fn is_language_subtag(part: &str) -> bool {
    (2..=3).contains(&part.len()) && is_alpha(part)
}

/// `true` for a two-letter or three-digit region.
fn is_region_subtag(part: &str) -> bool {
    (part.len() == 2 && is_alpha(part))
        || (part.len() == 3 && part.chars().all(|c| c.is_ascii_digit()))
}

/// Language segment accepted in file names: two lowercase letters.
fn is_file_language(part: &str) -> bool {
    part.len() == 2 && part.chars().all(|c| c.is_ascii_lowercase())
}

fn is_alpha(part: &str) -> bool {
    !part.is_empty() && part.chars().all(|c| c.is_ascii_alphabetic())
}

fn title_case(part: &str) -> String {
    let mut chars = part.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
    })
}
