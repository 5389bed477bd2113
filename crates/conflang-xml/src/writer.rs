//! Element-by-element XML output.

use conflang_tree::{Mapping, Value};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::trace;

use crate::XmlError;

/// Element name used for each array item.
pub const ITEM_ELEMENT: &str = "item";

/// Check that `name` can be used as an element name.
///
/// Accepts an ASCII letter or `_` followed by ASCII letters, digits, `_`,
/// `-` or `.`, and rejects anything starting with `xml` in any case.
pub fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        && !name.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("xml"))
}

/// Writes an indented XML document.
pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Create a writer indenting each level by `indent` spaces.
    pub fn new(indent: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', indent),
        }
    }

    /// Write `<?xml version="1.0"?>`.
    pub fn declaration(&mut self) -> Result<(), XmlError> {
        self.event(Event::Decl(BytesDecl::new("1.0", None, None)))
    }

    /// Open `<name>`.
    pub fn start(&mut self, name: &str) -> Result<(), XmlError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    /// Close `</name>`.
    pub fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Write `<name/>`.
    pub fn empty(&mut self, name: &str) -> Result<(), XmlError> {
        self.event(Event::Empty(BytesStart::new(name)))
    }

    /// Write escaped character data.
    pub fn text(&mut self, text: &str) -> Result<(), XmlError> {
        self.event(Event::Text(BytesText::from_escaped(partial_escape(text))))
    }

    /// Write `<name>text</name>`, or `<name/>` when `text` is empty.
    pub fn text_element(&mut self, name: &str, text: &str) -> Result<(), XmlError> {
        if text.is_empty() {
            return self.empty(name);
        }
        self.start(name)?;
        self.text(text)?;
        self.end(name)
    }

    /// Write `value` as an element called `name`.
    ///
    /// Mapping entries become child elements named by key, array items become
    /// `item` children, scalars become text content. Null and empty values
    /// produce `<name/>`.
    pub fn value(&mut self, name: &str, value: &Value) -> Result<(), XmlError> {
        trace!("element <{}> from {}", name, value.kind_name());
        match value {
            Value::Null => self.empty(name),
            Value::Integer(n) => self.text_element(name, &n.to_string()),
            Value::Text(text) => self.text_element(name, text),
            Value::Array(items) if items.is_empty() => self.empty(name),
            Value::Array(items) => {
                self.start(name)?;
                for item in items {
                    self.value(ITEM_ELEMENT, item)?;
                }
                self.end(name)
            }
            Value::Mapping(mapping) => self.mapping(name, mapping),
        }
    }

    /// Write `mapping` as an element called `name`.
    pub fn mapping(&mut self, name: &str, mapping: &Mapping) -> Result<(), XmlError> {
        if mapping.is_empty() {
            return self.empty(name);
        }
        self.start(name)?;
        for (key, value) in mapping.iter() {
            self.value(key, value)?;
        }
        self.end(name)
    }

    /// Finish writing and return the document.
    pub fn finish(self) -> Result<String, XmlError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), XmlError> {
        self.writer
            .write_event(event)
            .map_err(|e| XmlError::Write(e.to_string()))
    }
}
