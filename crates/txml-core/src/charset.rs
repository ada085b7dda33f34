//! Character sets for reading and writing typed XML documents.
//!
//! Documents are produced as UTF-8 internally. Writing to a narrower charset
//! replaces every character it cannot represent with a numeric character
//! reference (`&#xE9;`), which is valid anywhere the codec emits character
//! data. Element names are not transcoded; the encoder only writes `ITEM`.

use crate::error::OptionsError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// A supported document character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    #[default]
    Utf8,
    Ascii,
    Latin1,
}

impl Charset {
    /// Resolve a charset label, ignoring case. Accepts the common aliases
    /// `utf8`, `ascii`, `latin1` and `latin-1`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Charset::Utf8),
            "us-ascii" | "ascii" => Some(Charset::Ascii),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Some(Charset::Latin1),
            _ => None,
        }
    }

    /// The label written into the XML declaration.
    pub fn label(self) -> &'static str {
        match self {
            Charset::Utf8 => "utf-8",
            Charset::Ascii => "us-ascii",
            Charset::Latin1 => "iso-8859-1",
        }
    }

    /// Highest code point stored as a single byte (or, for UTF-8, at all).
    fn max_char(self) -> u32 {
        match self {
            Charset::Utf8 => char::MAX as u32,
            Charset::Ascii => 0x7F,
            Charset::Latin1 => 0xFF,
        }
    }

    /// Transcode escaped markup text into this charset.
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        if self == Charset::Utf8 || text.is_ascii() {
            return Cow::Borrowed(text.as_bytes());
        }
        let limit = self.max_char();
        let mut out = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let code = ch as u32;
            if code <= limit {
                // ASCII and Latin-1 code points are their own byte values.
                out.push(code as u8);
            } else {
                out.extend_from_slice(format!("&#x{:X};", code).as_bytes());
            }
        }
        Cow::Owned(out)
    }

    /// Decode raw document bytes in this charset. Returns the offset of the
    /// first byte that is not valid in the charset on failure.
    pub fn decode(self, bytes: &[u8]) -> std::result::Result<String, usize> {
        match self {
            Charset::Utf8 => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| e.valid_up_to()),
            Charset::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(offset) => Err(offset),
                None => Ok(bytes.iter().map(|&b| b as char).collect()),
            },
            Charset::Latin1 => Ok(bytes.iter().map(|&b| b as char).collect()),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Charset {
    type Err = OptionsError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Charset::from_label(s).ok_or_else(|| OptionsError::UnsupportedEncoding(s.to_string()))
    }
}

impl TryFrom<String> for Charset {
    type Error = OptionsError;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.label().to_string()
    }
}
