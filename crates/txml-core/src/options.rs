//! Codec configuration.
//!
//! Both option structs implement `serde` with `#[serde(default)]`, so a host
//! application can embed them in its own configuration file and only spell out
//! the fields it changes.

use crate::charset::Charset;
use crate::error::OptionsError;
use serde::{Deserialize, Serialize};

/// Nesting limit applied when no other is configured. Deeper documents fail
/// with [`DecodeError::DepthLimitExceeded`](crate::DecodeError::DepthLimitExceeded).
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// What to do when one object node has several children with the same `key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeyPolicy {
    /// The last child wins. The key keeps the position of its first
    /// occurrence.
    LastWins,
    /// Duplicates fail with `InvalidSchema`.
    Reject,
}

/// Policy used when no other is configured.
pub const DEFAULT_DUPLICATE_KEY_POLICY: DuplicateKeyPolicy = DuplicateKeyPolicy::LastWins;

impl Default for DuplicateKeyPolicy {
    fn default() -> Self {
        DEFAULT_DUPLICATE_KEY_POLICY
    }
}

/// Options for decoding typed XML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Maximum element nesting depth; the root element is depth 1.
    pub max_depth: usize,
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            duplicate_keys: DEFAULT_DUPLICATE_KEY_POLICY,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }
}

/// Options for serializing a value to typed XML text.
///
/// The defaults (pretty-printed, UTF-8, with an XML declaration) match what
/// most consumers expect from a standalone document; use
/// [`EncodeOptions::compact`] for a single-line fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Indent nested elements by two spaces, one element per line.
    pub pretty: bool,
    pub encoding: Charset,
    /// Prefix the output with `<?xml version="1.0" encoding="..."?>`.
    pub declare_xml_header: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            encoding: Charset::Utf8,
            declare_xml_header: true,
        }
    }
}

impl EncodeOptions {
    /// Single-line UTF-8 output without a declaration.
    pub fn compact() -> Self {
        Self {
            pretty: false,
            encoding: Charset::Utf8,
            declare_xml_header: false,
        }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn with_declaration(mut self, declare: bool) -> Self {
        self.declare_xml_header = declare;
        self
    }

    pub fn with_charset(mut self, charset: Charset) -> Self {
        self.encoding = charset;
        self
    }

    /// Select the output charset by label (`utf-8`, `us-ascii`, `iso-8859-1`,
    /// and aliases).
    pub fn with_encoding(self, label: &str) -> std::result::Result<Self, OptionsError> {
        Ok(self.with_charset(label.parse()?))
    }
}
