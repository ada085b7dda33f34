//! Error types for typed XML decoding and option handling.
//!
//! Encoding has no error type: every [`Value`](crate::Value) has a canonical
//! XML form. Only the sink passed to [`write_to`](crate::write_to) can fail, and
//! that surfaces as a plain `std::io::Error`.

use crate::path::NodePath;
use crate::tag::TypeTag;
use thiserror::Error;

/// Errors that can occur while decoding a typed XML document.
///
/// Every variant except `MalformedXml` and `Io` names the node it refers to,
/// so callers can report the failure without re-walking the document.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The input is not well-formed XML. `position` is the byte offset the
    /// parser had reached when it gave up.
    #[error("malformed XML at byte {position}: {message}")]
    MalformedXml { message: String, position: u64 },

    /// An element has no `type` attribute.
    #[error("missing `type` attribute at {path}")]
    MissingType { path: NodePath },

    /// The `type` attribute is not one of the seven recognized tags.
    #[error("unknown type `{found}` at {path}")]
    UnknownType { path: NodePath, found: String },

    /// The element tree violates the typed XML convention: a scalar with
    /// children, a container with mixed keyed/unkeyed children, a missing or
    /// misplaced `value` attribute, text content, and so on.
    #[error("invalid schema at {path}: {reason}")]
    InvalidSchema { path: NodePath, reason: String },

    /// A leaf `value` attribute could not be parsed as its declared type.
    #[error("invalid {tag} literal {raw:?} at {path}")]
    ScalarParse {
        path: NodePath,
        tag: TypeTag,
        raw: String,
    },

    /// The document nests deeper than the configured maximum.
    #[error("nesting exceeds the maximum depth of {limit} at {path}")]
    DepthLimitExceeded { path: NodePath, limit: usize },

    /// Reading the input stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// The node the error refers to, when it refers to one.
    pub fn path(&self) -> Option<&NodePath> {
        match self {
            DecodeError::MissingType { path }
            | DecodeError::UnknownType { path, .. }
            | DecodeError::InvalidSchema { path, .. }
            | DecodeError::ScalarParse { path, .. }
            | DecodeError::DepthLimitExceeded { path, .. } => Some(path),
            DecodeError::MalformedXml { .. } | DecodeError::Io(_) => None,
        }
    }

    /// Re-anchor a path-carrying error onto the node at `path`.
    ///
    /// Leaf parsing runs without knowing where the leaf sits in the document;
    /// the decoder uses this to attach the real location afterwards.
    pub(crate) fn at(self, path: &NodePath) -> Self {
        match self {
            DecodeError::MissingType { .. } => DecodeError::MissingType { path: path.clone() },
            DecodeError::UnknownType { found, .. } => DecodeError::UnknownType {
                path: path.clone(),
                found,
            },
            DecodeError::InvalidSchema { reason, .. } => DecodeError::InvalidSchema {
                path: path.clone(),
                reason,
            },
            DecodeError::ScalarParse { tag, raw, .. } => DecodeError::ScalarParse {
                path: path.clone(),
                tag,
                raw,
            },
            DecodeError::DepthLimitExceeded { limit, .. } => DecodeError::DepthLimitExceeded {
                path: path.clone(),
                limit,
            },
            other => other,
        }
    }

    pub(crate) fn invalid_schema(path: &NodePath, reason: impl Into<String>) -> Self {
        DecodeError::InvalidSchema {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(message: impl Into<String>, position: u64) -> Self {
        DecodeError::MalformedXml {
            message: message.into(),
            position,
        }
    }
}

/// Errors raised while building codec options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The requested character set is not supported.
    #[error("unsupported encoding `{0}` (supported: utf-8, us-ascii, iso-8859-1)")]
    UnsupportedEncoding(String),
}

/// Convenience alias used throughout txml-core.
pub type Result<T> = std::result::Result<T, DecodeError>;
