//! `.ts` document writer
//!
//! Produces the layout Qt Linguist itself writes, so the output can replace
//! the original resource. Only the modelled parts are written: XML comments
//! and the `location`, `extracomment` and `translatorcomment` elements are
//! dropped.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{
    BytesDecl,
    BytesEnd,
    BytesStart,
    BytesText,
    Event,
};

use super::{
    Catalog,
    Context,
    Message,
};
use crate::error::CatalogError;

/// Indentation used by Qt Linguist.
const INDENT_SIZE: usize = 4;

impl Catalog {
    /// Serializes the catalog as a `.ts` document.
    ///
    /// Elements and comments the parser skipped are not reproduced.
    ///
    /// # Errors
    /// Returns [`CatalogError::Write`] if the underlying writer fails.
    pub fn write_ts<W: Write>(&self, output: W) -> Result<(), CatalogError> {
        let mut writer = Writer::new_with_indent(output, b' ', INDENT_SIZE);

        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        emit(&mut writer, Event::DocType(BytesText::from_escaped("TS")))?;

        let mut root = BytesStart::new("TS");
        root.push_attribute(("version", self.version.as_str()));
        if let Some(locale) = &self.locale {
            root.push_attribute(("language", locale.as_str()));
        }
        if let Some(source_language) = &self.source_language {
            root.push_attribute(("sourcelanguage", source_language.as_str()));
        }
        emit(&mut writer, Event::Start(root))?;

        for context in &self.contexts {
            write_context(&mut writer, context)?;
        }

        emit(&mut writer, Event::End(BytesEnd::new("TS")))?;
        writer.get_mut().write_all(b"\n")?;
        Ok(())
    }

    /// Serializes the catalog as a `.ts` document string.
    ///
    /// # Errors
    /// Returns [`CatalogError::Write`] if serialization fails.
    pub fn to_ts_string(&self) -> Result<String, CatalogError> {
        let mut buffer = Vec::new();
        self.write_ts(&mut buffer)?;
        String::from_utf8(buffer).map_err(|e| CatalogError::Write(e.to_string()))
    }
}

fn write_context<W: Write>(writer: &mut Writer<W>, context: &Context) -> Result<(), CatalogError> {
    emit(writer, Event::Start(BytesStart::new("context")))?;
    write_text_element(writer, BytesStart::new("name"), context.name())?;
    for message in context.messages() {
        write_message(writer, message)?;
    }
    emit(writer, Event::End(BytesEnd::new("context")))
}

fn write_message<W: Write>(writer: &mut Writer<W>, message: &Message) -> Result<(), CatalogError> {
    emit(writer, Event::Start(BytesStart::new("message")))?;
    write_text_element(writer, BytesStart::new("source"), &message.source)?;
    if let Some(comment) = &message.comment {
        write_text_element(writer, BytesStart::new("comment"), comment)?;
    }

    let mut translation = BytesStart::new("translation");
    if let Some(state) = message.state.as_attribute() {
        translation.push_attribute(("type", state));
    }
    write_text_element(writer, translation, &message.translation)?;

    emit(writer, Event::End(BytesEnd::new("message")))
}

/// Writes `<tag>text</tag>` on one line, or `<tag/>` for empty text.
///
/// Writing an empty element as a start/end pair would let the indenter put
/// whitespace between the tags, which would change the text.
fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    start: BytesStart<'_>,
    text: &str,
) -> Result<(), CatalogError> {
    if text.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    let end = start.to_end().into_owned();
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Text(BytesText::new(text)))?;
    emit(writer, Event::End(end))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), CatalogError> {
    writer.write_event(event).map_err(|e| CatalogError::Write(e.to_string()))
}
