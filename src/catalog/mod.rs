//! Translation catalogs parsed from Qt Linguist `.ts` resources.
//!
//! A [`Catalog`] is built once from a resource document and never mutated
//! afterwards. Lookups fall back to the key itself when a key has no usable
//! translation, so callers never display an empty label.

mod parser;
mod set;
mod writer;

use std::collections::HashMap;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize,
};

pub use set::CatalogSet;

use crate::error::CatalogError;
use crate::locale::Locale;
use crate::types::{
    SourcePosition,
    SourceRange,
};

/// Context name used by resources that do not group their messages.
pub const DEFAULT_CONTEXT: &str = "@default";

/// What to do when a key appears twice within one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicatePolicy {
    /// Fail with [`CatalogError::DuplicateKey`].
    #[default]
    Reject,
    /// Keep the first definition and ignore later ones.
    KeepFirst,
    /// Replace earlier definitions with the last one.
    KeepLast,
}

/// Translation state carried by the `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TranslationState {
    #[default]
    Finished,
    Unfinished,
    Obsolete,
    Vanished,
}

impl TranslationState {
    /// Parses the `type` attribute value.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(Self::Unfinished),
            "obsolete" => Some(Self::Obsolete),
            "vanished" => Some(Self::Vanished),
            _ => None,
        }
    }

    /// Value of the `type` attribute, `None` for finished translations.
    #[must_use]
    pub const fn as_attribute(self) -> Option<&'static str> {
        match self {
            Self::Finished => None,
            Self::Unfinished => Some("unfinished"),
            Self::Obsolete => Some("obsolete"),
            Self::Vanished => Some("vanished"),
        }
    }

    /// Obsolete and vanished messages are kept in the file but never served.
    #[must_use]
    pub const fn is_retired(self) -> bool {
        matches!(self, Self::Obsolete | Self::Vanished)
    }
}

/// One `<message>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Lookup key (`<source>` text)
    pub source: String,
    /// Translated text (`<translation>` text, possibly empty)
    pub translation: String,
    pub state: TranslationState,
    /// Disambiguation comment (`<comment>`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Span of the `<message>` element in the resource
    pub range: SourceRange,
}

impl Message {
    /// Builds a finished message without position information.
    #[must_use]
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            translation: translation.into(),
            state: TranslationState::Finished,
            comment: None,
            range: SourceRange::default(),
        }
    }

    /// Text served by lookups, `None` when the message is untranslated.
    #[must_use]
    pub fn usable_translation(&self) -> Option<&str> {
        (!self.translation.is_empty() && !self.state.is_retired())
            .then_some(self.translation.as_str())
    }
}

/// One `<context>` element: a namespace of messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Context {
    name: String,
    messages: Vec<Message>,
    /// Key to index into `messages`
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), messages: Vec::new(), index: HashMap::new() }
    }

    /// Adds a message, applying `policy` if its key already exists.
    ///
    /// # Errors
    /// Returns [`CatalogError::DuplicateKey`] under [`DuplicatePolicy::Reject`].
    pub fn push(&mut self, message: Message, policy: DuplicatePolicy) -> Result<(), CatalogError> {
        let Some(&existing) = self.index.get(&message.source) else {
            self.index.insert(message.source.clone(), self.messages.len());
            self.messages.push(message);
            return Ok(());
        };

        let first = self.messages.get(existing).map(|m| m.range.start).unwrap_or_default();
        match policy {
            DuplicatePolicy::Reject => Err(CatalogError::DuplicateKey {
                path: None,
                context: self.name.clone(),
                key: message.source,
                position: message.range.start,
                first,
            }),
            DuplicatePolicy::KeepFirst => {
                tracing::warn!(
                    context = %self.name,
                    key = %message.source,
                    line = message.range.start.line + 1,
                    "Ignoring duplicate key"
                );
                Ok(())
            }
            DuplicatePolicy::KeepLast => {
                tracing::warn!(
                    context = %self.name,
                    key = %message.source,
                    line = first.line + 1,
                    "Replacing duplicate key"
                );
                if let Some(slot) = self.messages.get_mut(existing) {
                    *slot = message;
                }
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Messages in document order.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn message(&self, key: &str) -> Option<&Message> {
        self.index.get(key).and_then(|&i| self.messages.get(i))
    }

    /// Usable translation of `key` in this context.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.message(key).and_then(Message::usable_translation)
    }
}

/// A parsed `.ts` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// `version` attribute of the `TS` root
    version: String,
    /// Target locale, `None` for locale-neutral resources
    locale: Option<Locale>,
    source_language: Option<Locale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
    contexts: Vec<Context>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new(version: impl Into<String>, locale: Option<Locale>) -> Self {
        Self {
            version: version.into(),
            locale,
            source_language: None,
            file_path: None,
            contexts: Vec::new(),
        }
    }

    /// Appends a context.
    #[must_use]
    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// Parses a resource, rejecting duplicate keys.
    ///
    /// # Errors
    /// - [`CatalogError::MalformedResource`] if the document does not follow the `TS` schema
    /// - [`CatalogError::DuplicateKey`] if a key repeats within a context
    pub fn load(source: &str) -> Result<Self, CatalogError> {
        Self::load_with(source, DuplicatePolicy::Reject)
    }

    /// Parses a resource with an explicit duplicate-key policy.
    ///
    /// # Errors
    /// Same as [`Catalog::load`]; `DuplicateKey` only under [`DuplicatePolicy::Reject`].
    pub fn load_with(source: &str, policy: DuplicatePolicy) -> Result<Self, CatalogError> {
        parser::parse(source, policy)
    }

    /// Reads and parses a resource file.
    ///
    /// The locale comes from the `language` attribute, or from the file name
    /// (`NETGENPlugin_msg_fr.ts` → `fr`) when the attribute is missing.
    ///
    /// # Errors
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as [`Catalog::load`].
    pub fn from_file(file_path: &Path, policy: DuplicatePolicy) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(file_path)?;
        Self::from_content(file_path, &content, policy)
    }

    /// Parses already-read file content, attributing it to `file_path`.
    ///
    /// # Errors
    /// Same as [`Catalog::load`], with the path attached to the error.
    pub fn from_content(
        file_path: &Path,
        content: &str,
        policy: DuplicatePolicy,
    ) -> Result<Self, CatalogError> {
        let path = file_path.to_string_lossy();
        let mut catalog = Self::load_with(content, policy).map_err(|e| e.with_path(&path))?;

        if catalog.locale.is_none() {
            catalog.locale = Locale::detect_from_path(file_path);
        }
        catalog.file_path = Some(path.into_owned());

        tracing::debug!(
            file_path = ?catalog.file_path,
            locale = ?catalog.locale,
            entries = catalog.len(),
            "Loaded catalog"
        );
        Ok(catalog)
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub const fn locale(&self) -> Option<&Locale> {
        self.locale.as_ref()
    }

    #[must_use]
    pub const fn source_language(&self) -> Option<&Locale> {
        self.source_language.as_ref()
    }

    #[must_use]
    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    #[must_use]
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    #[must_use]
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// All messages, context by context in document order.
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.contexts.iter().flat_map(|c| c.messages.iter())
    }

    /// Keys with a usable translation.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages().filter(|m| m.usable_translation().is_some()).map(|m| m.source.as_str())
    }

    /// Number of messages across all contexts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Usable translation of `key`, searching contexts in document order.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.contexts.iter().find_map(|c| c.get(key))
    }

    /// Usable translation of `key` within one context.
    #[must_use]
    pub fn get_in(&self, context: &str, key: &str) -> Option<&str> {
        self.context(context).and_then(|c| c.get(key))
    }

    /// Translation of `key`, or `key` itself when untranslated.
    #[must_use]
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    /// Translation of `key`, or `default` when untranslated.
    #[must_use]
    pub fn lookup_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Translation of `key`, or [`CatalogError::MissingTranslation`].
    ///
    /// # Errors
    /// Returns `MissingTranslation` if `key` has no usable translation.
    pub fn require(&self, key: &str) -> Result<&str, CatalogError> {
        self.get(key).ok_or_else(|| CatalogError::MissingTranslation {
            locale: self.locale.as_ref().map_or_else(String::new, ToString::to_string),
            key: key.to_string(),
        })
    }

    /// Key of the message whose element spans `position`.
    #[must_use]
    pub fn key_at_position(&self, position: SourcePosition) -> Option<&str> {
        self.messages().find(|m| m.range.contains(position)).map(|m| m.source.as_str())
    }
}
