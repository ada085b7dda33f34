//! Typed XML Encoder — converts a [`Value`] into XML.
//!
//! Encoding never fails: the type tag follows from the value's variant, so
//! every value has exactly one canonical element tree.
//!
//! - **Null**: `<ITEM type="null"/>`
//! - **Scalars**: `<ITEM type="integer" value="5"/>`; strings verbatim,
//!   other scalars as canonical literals (`true`, `5`, `5.0`)
//! - **Lists**: one child per item, in order, without `key`
//! - **Objects**: one child per member, in insertion order, with `key`
//!
//! # Example
//! ```
//! use txml_core::{encode_to_string, EncodeOptions, Value};
//! let value = Value::List(vec![Value::Integer(1), Value::Float(2.5)]);
//! let xml = encode_to_string(&value, &EncodeOptions::default());
//! // <?xml version="1.0" encoding="utf-8"?>
//! // <ITEM type="list">
//! //   <ITEM type="integer" value="1"/>
//! //   <ITEM type="float" value="2.5"/>
//! // </ITEM>
//! assert!(xml.contains(r#"<ITEM type="float" value="2.5"/>"#));
//! ```

use crate::charset::Charset;
use crate::options::EncodeOptions;
use crate::tag::{format_scalar, TypeTag};
use crate::tree::Element;
use crate::value::Value;
use std::io::{self, Write};

/// Element name used for every node. Decoding ignores names.
pub const ELEMENT_NAME: &str = "ITEM";

/// Build the element tree for a value.
///
/// Encoding and writing recurse once per nesting level. The round trip holds
/// for values no deeper than the decoder's `max_depth` (the root counts as
/// one level, [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH) unless
/// configured); deeper values still encode, but decoding them needs a raised
/// limit.
pub fn encode_to_element(value: &Value) -> Element {
    let mut element =
        Element::new(ELEMENT_NAME).with_attribute("type", TypeTag::classify(value).as_str());

    if let Some(text) = format_scalar(value) {
        element.set_attribute("value", text);
    }

    match value {
        Value::List(items) => {
            for item in items {
                element.push_child(encode_to_element(item));
            }
        }
        Value::Object(members) => {
            for (key, member) in members {
                let mut child = encode_to_element(member);
                child.set_attribute("key", key.as_str());
                element.push_child(child);
            }
        }
        Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {}
    }
    element
}

/// Serialize a value to document bytes in the configured charset.
pub fn encode_to_text(value: &Value, options: &EncodeOptions) -> Vec<u8> {
    let mut out = Vec::new();
    write_to(value, options, &mut out).expect("writing to a Vec<u8> cannot fail");
    out
}

/// Serialize a value to a UTF-8 string. The `encoding` option is ignored:
/// a `String` is always UTF-8, and the declaration says so.
pub fn encode_to_string(value: &Value, options: &EncodeOptions) -> String {
    let options = options.clone().with_charset(Charset::Utf8);
    let bytes = encode_to_text(value, &options);
    // UTF-8 output is built from `&str` pieces only.
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Serialize a value into any byte sink.
pub fn write_to<W: Write>(value: &Value, options: &EncodeOptions, sink: W) -> io::Result<()> {
    encode_to_element(value).write(sink, options)
}
