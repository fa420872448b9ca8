//! `.ts` document parser
//!
//! Walks the XML event stream and enforces the `TS` schema:
//! `TS > context > (name, message*)`, `message > (source, translation)`.
//! Elements the catalog does not model (`location`, `extracomment`,
//! `translatorcomment`, `dependencies`, ...) are skipped.

use quick_xml::Reader;
use quick_xml::events::{
    BytesStart,
    Event,
};
use quick_xml::name::QName;

use super::{
    Catalog,
    Context,
    DuplicatePolicy,
    Message,
    TranslationState,
};
use crate::error::CatalogError;
use crate::locale::Locale;
use crate::types::{
    SourcePosition,
    SourceRange,
};

/// Root element name.
const TS_TAG: &[u8] = b"TS";
const CONTEXT_TAG: &[u8] = b"context";
const NAME_TAG: &[u8] = b"name";
const MESSAGE_TAG: &[u8] = b"message";
const SOURCE_TAG: &[u8] = b"source";
const TRANSLATION_TAG: &[u8] = b"translation";
const COMMENT_TAG: &[u8] = b"comment";

/// Parses a complete `.ts` document.
pub(super) fn parse(text: &str, policy: DuplicatePolicy) -> Result<Catalog, CatalogError> {
    let mut parser = Parser::new(text, policy);
    parser.parse_document()
}

/// An element start read from the stream.
struct Element<'a> {
    start: BytesStart<'a>,
    /// `true` for `<tag/>`
    empty: bool,
    /// Byte offset of the `<`
    offset: usize,
}

/// Streaming parser state.
struct Parser<'a> {
    reader: Reader<&'a [u8]>,
    text: &'a str,
    policy: DuplicatePolicy,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, policy: DuplicatePolicy) -> Self {
        Self { reader: Reader::from_str(text), text, policy }
    }

    fn parse_document(&mut self) -> Result<Catalog, CatalogError> {
        loop {
            let offset = self.offset();
            match self.read_event()? {
                Event::Start(start) => return self.parse_root(Element { start, empty: false, offset }),
                Event::Empty(start) => return self.parse_root(Element { start, empty: true, offset }),
                Event::Text(text) if is_blank(&text) => {}
                Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => return Err(self.malformed_at(offset, "document has no <TS> root element")),
                _ => return Err(self.malformed_at(offset, "unexpected content before <TS>")),
            }
        }
    }

    fn parse_root(&mut self, root: Element<'a>) -> Result<Catalog, CatalogError> {
        if root.start.name().as_ref() != TS_TAG {
            let name = String::from_utf8_lossy(root.start.name().as_ref()).into_owned();
            return Err(self.malformed_at(root.offset, format!("expected <TS> root, found <{name}>")));
        }

        let mut catalog = Catalog::new(String::new(), None);
        for (key, value) in self.attributes(&root)? {
            match key.as_str() {
                "version" => catalog.version = value,
                "language" if !value.is_empty() => {
                    catalog.locale = Some(self.parse_locale(&value, root.offset)?);
                }
                "sourcelanguage" if !value.is_empty() => {
                    catalog.source_language = Some(self.parse_locale(&value, root.offset)?);
                }
                _ => {}
            }
        }
        if catalog.version.is_empty() {
            return Err(self.malformed_at(root.offset, "<TS> is missing the version attribute"));
        }
        if root.empty {
            return Err(self.malformed_at(root.offset, "<TS> contains no <context>"));
        }

        while let Some(child) = self.next_child(TS_TAG)? {
            if child.start.name().as_ref() == CONTEXT_TAG {
                let context = self.parse_context(&child)?;
                catalog.contexts.push(context);
            } else {
                self.skip(&child)?;
            }
        }
        self.expect_end_of_document()?;

        if catalog.contexts.is_empty() {
            return Err(self.malformed_at(root.offset, "<TS> contains no <context>"));
        }
        Ok(catalog)
    }

    fn parse_context(&mut self, element: &Element<'a>) -> Result<Context, CatalogError> {
        if element.empty {
            return Err(self.malformed_at(element.offset, "<context> without <name>"));
        }

        let mut name = None;
        let mut messages = Vec::new();
        while let Some(child) = self.next_child(CONTEXT_TAG)? {
            match child.start.name().as_ref() {
                NAME_TAG => {
                    if name.is_some() {
                        return Err(self.malformed_at(child.offset, "<context> has more than one <name>"));
                    }
                    name = Some(self.read_text(&child)?);
                }
                MESSAGE_TAG => messages.push(self.parse_message(&child)?),
                _ => self.skip(&child)?,
            }
        }

        let name = name.ok_or_else(|| self.malformed_at(element.offset, "<context> without <name>"))?;
        let mut context = Context::new(name);
        for message in messages {
            context.push(message, self.policy)?;
        }
        Ok(context)
    }

    fn parse_message(&mut self, element: &Element<'a>) -> Result<Message, CatalogError> {
        if element.empty {
            return Err(self.malformed_at(element.offset, "<message> without <source>"));
        }
        for (key, value) in self.attributes(element)? {
            if key == "numerus" && value == "yes" {
                return Err(self.malformed_at(element.offset, "numerus forms are not supported"));
            }
        }

        let mut source = None;
        let mut translation = None;
        let mut comment = None;
        while let Some(child) = self.next_child(MESSAGE_TAG)? {
            match child.start.name().as_ref() {
                SOURCE_TAG => {
                    if source.is_some() {
                        return Err(self.malformed_at(child.offset, "<message> has more than one <source>"));
                    }
                    source = Some(self.read_text(&child)?);
                }
                TRANSLATION_TAG => {
                    if translation.is_some() {
                        return Err(
                            self.malformed_at(child.offset, "<message> has more than one <translation>")
                        );
                    }
                    let state = self.translation_state(&child)?;
                    translation = Some((self.read_text(&child)?, state));
                }
                COMMENT_TAG => comment = Some(self.read_text(&child)?),
                _ => self.skip(&child)?,
            }
        }
        let end = self.offset();

        let source =
            source.ok_or_else(|| self.malformed_at(element.offset, "<message> without <source>"))?;
        let (translation, state) = translation.ok_or_else(|| {
            self.malformed_at(element.offset, format!("<message> '{source}' without <translation>"))
        })?;

        Ok(Message {
            source,
            translation,
            state,
            comment,
            range: SourceRange::from_offsets(self.text, element.offset, end),
        })
    }

    fn translation_state(&self, element: &Element<'a>) -> Result<TranslationState, CatalogError> {
        let mut state = TranslationState::Finished;
        for (key, value) in self.attributes(element)? {
            if key == "type" {
                state = TranslationState::from_attribute(&value).ok_or_else(|| {
                    self.malformed_at(element.offset, format!("unknown translation type '{value}'"))
                })?;
            }
        }
        Ok(state)
    }

    /// Reads the next child element of `parent`, or `None` at `</parent>`.
    ///
    /// Whitespace and comments between children are ignored; any other text
    /// is a schema violation.
    fn next_child(&mut self, parent: &[u8]) -> Result<Option<Element<'a>>, CatalogError> {
        loop {
            let offset = self.offset();
            match self.read_event()? {
                Event::Start(start) => return Ok(Some(Element { start, empty: false, offset })),
                Event::Empty(start) => return Ok(Some(Element { start, empty: true, offset })),
                Event::End(end) if end.name().as_ref() == parent => return Ok(None),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => {
                    let parent = String::from_utf8_lossy(parent);
                    return Err(self.malformed_at(offset, format!("unexpected end of document inside <{parent}>")));
                }
                _ => {
                    let parent = String::from_utf8_lossy(parent);
                    return Err(self.malformed_at(offset, format!("unexpected content inside <{parent}>")));
                }
            }
        }
    }

    /// Reads the text content of a leaf element, resolving entities.
    fn read_text(&mut self, element: &Element<'a>) -> Result<String, CatalogError> {
        let mut content = String::new();
        if element.empty {
            return Ok(content);
        }

        let tag = element.start.name().as_ref().to_vec();
        loop {
            let offset = self.offset();
            match self.read_event()? {
                Event::Text(text) => {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| self.malformed_at(offset, format!("invalid text: {e}")))?;
                    content.push_str(&unescaped);
                }
                Event::CData(data) => {
                    let raw = std::str::from_utf8(&data)
                        .map_err(|e| self.malformed_at(offset, format!("invalid CDATA: {e}")))?;
                    content.push_str(raw);
                }
                Event::End(end) if end.name().as_ref() == tag.as_slice() => return Ok(content),
                Event::Comment(_) => {}
                Event::Start(child) | Event::Empty(child) => {
                    let name = String::from_utf8_lossy(child.name().as_ref()).into_owned();
                    let message = if name == "numerusform" {
                        "numerus forms are not supported".to_string()
                    } else {
                        format!("unexpected element <{name}> in text content")
                    };
                    return Err(self.malformed_at(offset, message));
                }
                _ => {
                    let tag = String::from_utf8_lossy(&tag);
                    return Err(self.malformed_at(offset, format!("unterminated <{tag}>")));
                }
            }
        }
    }

    /// Skips an element the catalog does not model, including its children.
    fn skip(&mut self, element: &Element<'a>) -> Result<(), CatalogError> {
        if element.empty {
            return Ok(());
        }
        let name = element.start.name().as_ref().to_vec();
        tracing::trace!(element = %String::from_utf8_lossy(&name), "Skipping element");
        self.reader
            .read_to_end(QName(&name))
            .map(|_| ())
            .map_err(|e| self.malformed_at(element.offset, e.to_string()))
    }

    /// Accepts only whitespace, comments and processing instructions after `</TS>`.
    fn expect_end_of_document(&mut self) -> Result<(), CatalogError> {
        loop {
            let offset = self.offset();
            match self.read_event()? {
                Event::Eof => return Ok(()),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                _ => return Err(self.malformed_at(offset, "unexpected content after </TS>")),
            }
        }
    }

    /// Collects unescaped attributes of an element.
    fn attributes(&self, element: &Element<'a>) -> Result<Vec<(String, String)>, CatalogError> {
        element
            .start
            .attributes()
            .map(|attribute| {
                let attribute = attribute
                    .map_err(|e| self.malformed_at(element.offset, format!("invalid attribute: {e}")))?;
                let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
                let value = attribute
                    .unescape_value()
                    .map_err(|e| self.malformed_at(element.offset, format!("invalid attribute: {e}")))?;
                Ok((key, value.into_owned()))
            })
            .collect()
    }

    fn parse_locale(&self, value: &str, offset: usize) -> Result<Locale, CatalogError> {
        Locale::parse(value).map_err(|e| self.malformed_at(offset, e.to_string()))
    }

    fn read_event(&mut self) -> Result<Event<'a>, CatalogError> {
        let offset = self.offset();
        self.reader.read_event().map_err(|e| self.malformed_at(offset, e.to_string()))
    }

    /// Current byte offset of the reader.
    fn offset(&self) -> usize {
        usize::try_from(self.reader.buffer_position()).unwrap_or(usize::MAX)
    }

    fn malformed_at(&self, offset: usize, message: impl Into<String>) -> CatalogError {
        CatalogError::MalformedResource {
            path: None,
            position: SourcePosition::from_offset(self.text, offset),
            message: message.into(),
        }
    }
}

/// `true` if text consists only of XML whitespace.
fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}
