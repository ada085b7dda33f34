//! Typed XML Decoder — converts an XML document into a [`Value`].
//!
//! Every element declares its type in a `type` attribute; the decoder never
//! guesses from the text. Shape rules:
//!
//! - **Leaves**: a childless element is parsed from its own tag and `value`
//!   attribute ([`TypeTag::parse_leaf`]). Childless `object` and `list`
//!   elements are the empty containers.
//! - **Lists**: one or more children, none of them with a `key` attribute.
//! - **Objects**: one or more children, every one of them with a `key`.
//! - A container whose children mix keyed and unkeyed elements, or whose
//!   children disagree with its declared tag, is rejected.
//!
//! # Key design decisions
//!
//! - **Errors carry the node path**: every schema failure names the node it
//!   happened at (`/users/0/age`), so callers can report it without
//!   re-walking the document.
//! - **Bounded recursion**: parsing already refuses documents deeper than
//!   [`DecodeOptions::max_depth`]; [`decode_element`] re-checks the limit
//!   because its tree may be built by hand.
//! - **Duplicate keys**: governed by [`DecodeOptions::duplicate_keys`]; the
//!   default keeps the last value at the first occurrence's position.

use crate::error::{DecodeError, Result};
use crate::options::{DecodeOptions, DuplicateKeyPolicy};
use crate::path::NodePath;
use crate::tag::TypeTag;
use crate::tree::Element;
use crate::value::{upsert, Value};
use std::io::Read;

/// Decode a typed XML document read from a byte stream.
///
/// The whole stream is read into memory first; the codec works on complete
/// trees.
pub fn decode_from_reader<R: Read>(source: R) -> Result<Value> {
    decode_from_reader_with(source, &DecodeOptions::default())
}

pub fn decode_from_reader_with<R: Read>(mut source: R, options: &DecodeOptions) -> Result<Value> {
    let mut bytes = Vec::new();
    source.read_to_end(&mut bytes)?;
    decode_from_text_with(&bytes, options)
}

/// Decode a typed XML document held in memory as raw bytes.
///
/// The character set is taken from the XML declaration, defaulting to UTF-8.
pub fn decode_from_text(bytes: &[u8]) -> Result<Value> {
    decode_from_text_with(bytes, &DecodeOptions::default())
}

pub fn decode_from_text_with(bytes: &[u8], options: &DecodeOptions) -> Result<Value> {
    let root = Element::parse(bytes, options.max_depth)?;
    decode_element_with(&root, options)
}

/// Decode a typed XML document that is already a string.
pub fn decode_from_str(xml: &str) -> Result<Value> {
    decode_from_str_with(xml, &DecodeOptions::default())
}

pub fn decode_from_str_with(xml: &str, options: &DecodeOptions) -> Result<Value> {
    let root = Element::parse_str(xml, options.max_depth)?;
    decode_element_with(&root, options)
}

/// Decode an element tree. The root's own `key` attribute, if any, is
/// ignored.
pub fn decode_element(root: &Element) -> Result<Value> {
    decode_element_with(root, &DecodeOptions::default())
}

pub fn decode_element_with(root: &Element, options: &DecodeOptions) -> Result<Value> {
    decode_node(root, &NodePath::root(), options)
}

/// Shape of a container, as told by its children's `key` attributes.
enum Shape {
    List,
    Object,
}

fn decode_node(element: &Element, path: &NodePath, options: &DecodeOptions) -> Result<Value> {
    if path.depth() >= options.max_depth {
        return Err(DecodeError::DepthLimitExceeded {
            path: path.clone(),
            limit: options.max_depth,
        });
    }

    let tag = read_tag(element, path)?;

    if element.text.as_deref().is_some_and(|t| !t.trim().is_empty()) {
        return Err(DecodeError::invalid_schema(
            path,
            "text content is not allowed; values belong in the `value` attribute",
        ));
    }

    if element.children.is_empty() {
        return tag
            .parse_leaf(element.attribute("value"))
            .map_err(|e| e.at(path));
    }

    if !tag.is_container() {
        return Err(DecodeError::invalid_schema(
            path,
            format!("`{}` node must not have child elements", tag),
        ));
    }
    if element.attribute("value").is_some() {
        return Err(DecodeError::invalid_schema(
            path,
            format!("`{}` node must not carry a `value` attribute", tag),
        ));
    }

    match (tag, container_shape(element, path)?) {
        (TypeTag::List, Shape::List) => decode_list(element, path, options),
        (TypeTag::Object, Shape::Object) => decode_object(element, path, options),
        (TypeTag::Object, Shape::List) => Err(DecodeError::invalid_schema(
            path,
            "every child of an `object` node needs a `key` attribute",
        )),
        _ => Err(DecodeError::invalid_schema(
            path,
            "children of a `list` node must not carry a `key` attribute",
        )),
    }
}

fn read_tag(element: &Element, path: &NodePath) -> Result<TypeTag> {
    let raw = element
        .attribute("type")
        .ok_or_else(|| DecodeError::MissingType { path: path.clone() })?;
    raw.parse::<TypeTag>().map_err(|e| e.at(path))
}

/// All children unkeyed → list; all keyed → object; a mix is ambiguous.
fn container_shape(element: &Element, path: &NodePath) -> Result<Shape> {
    let keyed = element
        .children
        .iter()
        .filter(|child| child.attribute("key").is_some())
        .count();
    if keyed == 0 {
        Ok(Shape::List)
    } else if keyed == element.children.len() {
        Ok(Shape::Object)
    } else {
        Err(DecodeError::invalid_schema(
            path,
            format!(
                "ambiguous container: {} of {} children carry a `key` attribute",
                keyed,
                element.children.len()
            ),
        ))
    }
}

fn decode_list(element: &Element, path: &NodePath, options: &DecodeOptions) -> Result<Value> {
    element
        .children
        .iter()
        .enumerate()
        .map(|(i, child)| decode_node(child, &path.index(i), options))
        .collect::<Result<Vec<_>>>()
        .map(Value::List)
}

fn decode_object(element: &Element, path: &NodePath, options: &DecodeOptions) -> Result<Value> {
    let mut members = Vec::with_capacity(element.children.len());
    for child in &element.children {
        // `container_shape` has checked that every child is keyed.
        let Some(key) = child.attribute("key") else {
            continue;
        };
        let child_path = path.key(key);
        let value = decode_node(child, &child_path, options)?;
        let replaced = upsert(&mut members, key.to_string(), value);
        if replaced && options.duplicate_keys == DuplicateKeyPolicy::Reject {
            return Err(DecodeError::invalid_schema(
                &child_path,
                format!("duplicate key `{}`", key),
            ));
        }
    }
    Ok(Value::Object(members))
}
