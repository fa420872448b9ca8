//! Shared helpers for unit tests.

use std::fmt::Write;

/// Builds a `.ts` document with one `@default` context.
///
/// # Arguments
/// * `language` - value of the `language` attribute, omitted when `None`
/// * `entries` - `(source, translation)` pairs, written verbatim (no escaping)
pub(crate) fn ts_document(language: Option<&str>, entries: &[(&str, &str)]) -> String {
    let language = language.map_or_else(String::new, |l| format!(" language=\"{l}\""));
    let mut document = format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<TS version=\"2.0\"{language}>\n<context>\n    <name>@default</name>\n"
    );
    for (source, translation) in entries {
        let _ = write!(
            document,
            "    <message>\n        <source>{source}</source>\n        <translation>{translation}</translation>\n    </message>\n"
        );
    }
    document.push_str("</context>\n</TS>\n");
    document
}
