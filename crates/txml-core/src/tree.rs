//! Minimal owned XML element tree, read and written with `quick-xml`.
//!
//! The typed XML convention only needs element names, attributes and child
//! elements, so that is all the tree models. Text is kept only so the decoder
//! can reject mixed content; comments, processing instructions, the XML
//! declaration and DOCTYPE are skipped while parsing.
//!
//! # Key design decisions
//!
//! - **No recursion while parsing**: open elements live on an explicit stack,
//!   and the nesting limit is enforced before an element is pushed. Every
//!   later recursive walk is bounded by that limit.
//! - **Full attribute escaping**: tabs, newlines and carriage returns are
//!   written as character references. Reading applies attribute-value
//!   normalization, so literal whitespace in an attribute becomes a space.

use crate::charset::Charset;
use crate::error::{DecodeError, Result};
use crate::options::EncodeOptions;
use crate::path::NodePath;
use quick_xml::escape::{escape, resolve_predefined_entity, unescape};
use quick_xml::events::{BytesDecl, BytesEnd, BytesRef, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::io::{self, Write};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One XML element with its attributes (in document order) and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Character data directly inside this element, if any was not
    /// whitespace.
    pub text: Option<String>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// The value of attribute `name`, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set attribute `name`, replacing an existing value in place.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Parse a complete document from raw bytes.
    ///
    /// The character set comes from the XML declaration (UTF-8 when there is
    /// none); a leading UTF-8 byte order mark is skipped.
    pub fn parse(bytes: &[u8], max_depth: usize) -> Result<Element> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let charset = declared_charset(bytes)?;
        let text = charset.decode(bytes).map_err(|offset| {
            DecodeError::malformed(
                format!("input is not valid {}", charset.label()),
                offset as u64,
            )
        })?;
        Element::parse_str(&text, max_depth)
    }

    /// Parse a complete document that is already text.
    pub fn parse_str(text: &str, max_depth: usize) -> Result<Element> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                DecodeError::malformed(e.to_string(), reader.buffer_position() as u64)
            })?;
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(start) => {
                    let element =
                        open_element(&start, &stack, root.is_some(), max_depth, position)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element =
                        open_element(&start, &stack, root.is_some(), max_depth, position)?;
                    attach(element, &mut stack, &mut root);
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| DecodeError::malformed("unexpected closing tag", position))?;
                    attach(element, &mut stack, &mut root);
                }
                Event::Text(text) => {
                    append_text(&mut stack, &String::from_utf8_lossy(&text), position)?;
                }
                Event::CData(cdata) => {
                    append_text(&mut stack, &String::from_utf8_lossy(&cdata), position)?;
                }
                Event::GeneralRef(reference) => {
                    let resolved = resolve_reference(&reference, position)?;
                    append_text(&mut stack, &resolved, position)?;
                }
                Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(DecodeError::malformed(
                format!("document ended inside <{}>", open.name),
                reader.buffer_position() as u64,
            ));
        }
        root.ok_or_else(|| {
            DecodeError::malformed("document has no root element", reader.buffer_position() as u64)
        })
    }

    /// Serialize this element as a document.
    ///
    /// Only the sink can fail; the markup itself is always well-formed.
    pub fn write<W: Write>(&self, sink: W, options: &EncodeOptions) -> io::Result<()> {
        let mut writer = if options.pretty {
            Writer::new_with_indent(sink, b' ', 2)
        } else {
            Writer::new(sink)
        };
        let charset = options.encoding;

        if options.declare_xml_header {
            writer.write_event(Event::Decl(BytesDecl::new(
                "1.0",
                Some(charset.label()),
                None,
            )))?;
        }
        write_element(self, &mut writer, charset)?;
        if options.pretty {
            writer.get_mut().write_all(b"\n")?;
        }
        Ok(())
    }
}

/// Read the `encoding` pseudo-attribute of a leading XML declaration.
fn declared_charset(bytes: &[u8]) -> Result<Charset> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    let decl = match reader.read_event_into(&mut buf) {
        Ok(Event::Decl(decl)) => decl,
        // Anything else, including parse errors, is left to the main pass.
        _ => return Ok(Charset::Utf8),
    };
    match decl.encoding() {
        None => Ok(Charset::Utf8),
        Some(Ok(label)) => {
            let label = String::from_utf8_lossy(&label);
            Charset::from_label(&label).ok_or_else(|| {
                DecodeError::malformed(format!("unsupported document encoding `{}`", label), 0)
            })
        }
        Some(Err(e)) => Err(DecodeError::malformed(e.to_string(), 0)),
    }
}

/// Turn a start tag into an element, enforcing the single-root rule and the
/// nesting limit.
fn open_element(
    start: &BytesStart,
    stack: &[Element],
    root_closed: bool,
    max_depth: usize,
    position: u64,
) -> Result<Element> {
    if stack.is_empty() && root_closed {
        return Err(DecodeError::malformed(
            "document has more than one root element",
            position,
        ));
    }
    if stack.len() >= max_depth {
        return Err(DecodeError::DepthLimitExceeded {
            path: open_path(stack),
            limit: max_depth,
        });
    }

    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DecodeError::malformed(e.to_string(), position))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = normalize_attribute(&attr.value);
        let value = unescape(&raw)
            .map_err(|e| DecodeError::malformed(format!("attribute `{}`: {}", key, e), position))?
            .into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

/// Attribute-value normalization: literal tabs and line breaks read as
/// spaces. Escaped ones (`&#10;`) survive because unescaping runs after this.
fn normalize_attribute(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    raw.replace("\r\n", " ").replace(['\t', '\n', '\r'], " ")
}

/// Positional path of the element about to be opened below `stack`.
fn open_path(stack: &[Element]) -> NodePath {
    stack
        .iter()
        .fold(NodePath::root(), |path, parent| path.index(parent.children.len()))
}

fn attach(element: Element, stack: &mut [Element], root: &mut Option<Element>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Text a reference between elements stands for. Undeclared entities are
/// kept verbatim; they can only appear in content the decoder rejects.
fn resolve_reference(reference: &BytesRef, position: u64) -> Result<String> {
    let resolved = reference
        .resolve_char_ref()
        .map_err(|e| DecodeError::malformed(e.to_string(), position))?;
    if let Some(ch) = resolved {
        return Ok(ch.to_string());
    }
    let name = String::from_utf8_lossy(reference);
    Ok(match resolve_predefined_entity(&name) {
        Some(text) => text.to_string(),
        None => format!("&{};", name),
    })
}

fn append_text(stack: &mut [Element], text: &str, position: u64) -> Result<()> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(open) => {
            open.text.get_or_insert_with(String::new).push_str(text);
            Ok(())
        }
        None => Err(DecodeError::malformed(
            "text outside the root element",
            position,
        )),
    }
}

/// Element names are written verbatim; attribute values and text go through
/// the output charset.
fn write_element<W: Write>(
    element: &Element,
    writer: &mut Writer<W>,
    charset: Charset,
) -> io::Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        let escaped = escape_attribute(value);
        let key = charset.encode(key);
        let value = charset.encode(&escaped);
        start.push_attribute((&*key, &*value));
    }

    if element.children.is_empty() && element.text.is_none() {
        return writer.write_event(Event::Empty(start));
    }

    writer.write_event(Event::Start(start))?;
    if let Some(text) = &element.text {
        let escaped = escape(text.as_str());
        writer.get_mut().write_all(&charset.encode(&escaped))?;
    }
    for child in &element.children {
        write_element(child, writer, charset)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}

/// Escape markup characters plus the whitespace that attribute-value
/// normalization would otherwise rewrite.
fn escape_attribute(value: &str) -> Cow<'_, str> {
    let escaped = escape(value);
    if !escaped.contains(['\t', '\n', '\r']) {
        return escaped;
    }
    Cow::Owned(
        escaped
            .replace('\t', "&#9;")
            .replace('\n', "&#10;")
            .replace('\r', "&#13;"),
    )
}
