//! Type tags — the `type` attribute vocabulary and leaf (de)serialization.
//!
//! Scalar text is **accept-liberal, emit-strict**: decoding takes `true`, `1`,
//! `yes` (and `false`, `0`, `no`) in any case, while encoding always writes
//! `true`/`false`. Numbers are written as minimal JSON-style literals; floats
//! always keep a `.` or exponent so a human reader can tell them apart from
//! integers, although decoding only relies on the tag.

use crate::error::{DecodeError, Result};
use crate::path::NodePath;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// The seven node types of the typed XML convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Float,
    Integer,
    String,
    Boolean,
    Object,
    List,
    Null,
}

impl TypeTag {
    pub const ALL: [TypeTag; 7] = [
        TypeTag::Float,
        TypeTag::Integer,
        TypeTag::String,
        TypeTag::Boolean,
        TypeTag::Object,
        TypeTag::List,
        TypeTag::Null,
    ];

    /// The attribute text for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Float => "float",
            TypeTag::Integer => "integer",
            TypeTag::String => "string",
            TypeTag::Boolean => "boolean",
            TypeTag::Object => "object",
            TypeTag::List => "list",
            TypeTag::Null => "null",
        }
    }

    /// Scalar tags carry a `value` attribute and never have children.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TypeTag::Float | TypeTag::Integer | TypeTag::String | TypeTag::Boolean
        )
    }

    /// Container tags may have children.
    pub fn is_container(self) -> bool {
        matches!(self, TypeTag::Object | TypeTag::List)
    }

    /// The tag a value encodes under. Total over every variant.
    pub fn classify(value: &Value) -> TypeTag {
        match value {
            Value::Null => TypeTag::Null,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Integer(_) => TypeTag::Integer,
            Value::Float(_) => TypeTag::Float,
            Value::String(_) => TypeTag::String,
            Value::List(_) => TypeTag::List,
            Value::Object(_) => TypeTag::Object,
        }
    }

    /// Build the value of a childless node from its tag and `value` attribute.
    ///
    /// - Scalars require `raw`; `null`, `object` and `list` forbid it.
    /// - Childless `object` and `list` yield an empty container.
    /// - Text that does not parse as the declared scalar fails with
    ///   [`DecodeError::ScalarParse`].
    ///
    /// Errors are reported at the root path; the decoder re-anchors them.
    pub fn parse_leaf(self, raw: Option<&str>) -> Result<Value> {
        let here = NodePath::root();
        match (self, raw) {
            (TypeTag::Null, None) => Ok(Value::Null),
            (TypeTag::Object, None) => Ok(Value::Object(Vec::new())),
            (TypeTag::List, None) => Ok(Value::List(Vec::new())),
            (TypeTag::Null | TypeTag::Object | TypeTag::List, Some(_)) => {
                Err(DecodeError::invalid_schema(
                    &here,
                    format!("`{}` node must not carry a `value` attribute", self),
                ))
            }
            (_, None) => Err(DecodeError::invalid_schema(
                &here,
                format!("`{}` leaf is missing its `value` attribute", self),
            )),
            (TypeTag::String, Some(raw)) => Ok(Value::String(raw.to_string())),
            (TypeTag::Integer, Some(raw)) => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| self.bad_literal(raw)),
            (TypeTag::Float, Some(raw)) => parse_float(raw.trim())
                .map(Value::Float)
                .ok_or_else(|| self.bad_literal(raw)),
            (TypeTag::Boolean, Some(raw)) => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| self.bad_literal(raw)),
        }
    }

    fn bad_literal(self, raw: &str) -> DecodeError {
        DecodeError::ScalarParse {
            path: NodePath::root(),
            tag: self,
            raw: raw.to_string(),
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = DecodeError;

    /// Tags are matched exactly; `Integer` or ` list` are unknown.
    fn from_str(s: &str) -> Result<Self> {
        TypeTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownType {
                path: NodePath::root(),
                found: s.to_string(),
            })
    }
}

/// Canonical `value` attribute text for a scalar, or `None` for null and
/// containers.
pub fn format_scalar(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(if *b { "true" } else { "false" }.to_string()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Float(f) => Some(format_float(*f)),
        Value::String(s) => Some(s.clone()),
        Value::Null | Value::List(_) | Value::Object(_) => None,
    }
}

/// Shortest round-tripping literal (`5.0`, `0.1`, `1e300`). Non-finite values
/// use `NaN`, `Infinity` and `-Infinity`, which [`parse_float`] reads back.
fn format_float(f: f64) -> String {
    match serde_json::Number::from_f64(f) {
        Some(n) => n.to_string(),
        None if f.is_nan() => "NaN".to_string(),
        None if f > 0.0 => "Infinity".to_string(),
        None => "-Infinity".to_string(),
    }
}

fn parse_float(s: &str) -> Option<f64> {
    // Rust's parser also takes "inf"/"infinity"/"nan" in any case, which
    // covers the non-finite spellings written by `format_float`.
    s.parse::<f64>().ok()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
