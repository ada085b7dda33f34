//! # txml-core
//!
//! Pure-Rust codec between XML documents and JSON-shaped values.
//!
//! XML is untyped text, so every element carries a `type` attribute naming one
//! of seven tags (`null`, `boolean`, `integer`, `float`, `string`, `list`,
//! `object`). Scalars keep their text in a `value` attribute, object members are
//! children with a `key` attribute, and list items are children without one.
//! Decoding reads the tags back, so integers stay integers and floats stay
//! floats across a round trip.
//!
//! ## Quick start
//!
//! ```rust
//! use txml_core::{decode_from_str, encode_to_string, EncodeOptions, Value};
//!
//! let value = Value::Object(vec![
//!     ("name".to_string(), Value::String("Alice".to_string())),
//!     ("age".to_string(), Value::Integer(30)),
//! ]);
//!
//! let xml = encode_to_string(&value, &EncodeOptions::compact());
//! assert_eq!(
//!     xml,
//!     r#"<ITEM type="object"><ITEM type="string" value="Alice" key="name"/><ITEM type="integer" value="30" key="age"/></ITEM>"#
//! );
//!
//! let back = decode_from_str(&xml).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — `Value`, the JSON-shaped tree exchanged at the boundary
//! - [`tag`] — `TypeTag`, canonical scalar text and leaf parsing
//! - [`tree`] — minimal owned XML element tree, parsed and written with `quick-xml`
//! - [`charset`] — character sets for reading and writing documents
//! - [`decoder`] — XML → `Value`
//! - [`encoder`] — `Value` → XML
//! - [`options`] — `DecodeOptions` / `EncodeOptions`
//! - [`path`] — `NodePath`, locating the node an error refers to
//! - [`error`] — error types

pub mod charset;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod options;
pub mod path;
pub mod tag;
pub mod tree;
pub mod value;

pub use charset::Charset;
pub use decoder::{
    decode_element, decode_element_with, decode_from_reader, decode_from_reader_with,
    decode_from_str, decode_from_str_with, decode_from_text, decode_from_text_with,
};
pub use encoder::{encode_to_element, encode_to_string, encode_to_text, write_to, ELEMENT_NAME};
pub use error::{DecodeError, OptionsError, Result};
pub use options::{
    DecodeOptions, DuplicateKeyPolicy, EncodeOptions, DEFAULT_DUPLICATE_KEY_POLICY,
    DEFAULT_MAX_DEPTH,
};
pub use path::NodePath;
pub use tag::TypeTag;
pub use tree::Element;
pub use value::Value;
