//! Legacy text encoding for script blocks and archive entry names
//!
//! Script text is stored in a fixed legacy multi-byte encoding (`Shift_JIS` for
//! the shipped game). Decoding is strict: malformed byte sequences are an
//! error rather than being replaced, so the scanner can use a failed decode as
//! evidence that a candidate is not text.
//!
//! `Shift_JIS` here is plain JIS X 0208. Vendor extension rows are refused in
//! both directions, and characters with two common Unicode forms (`〜` and
//! `～` for `81 60`) decode to the JIS form and encode from either.

use std::fmt;

use encoding_rs::{Encoding as RsEncoding, GBK, SHIFT_JIS, UTF_8};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Supported legacy text encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextEncoding {
    #[default]
    #[serde(rename = "shift_jis", alias = "sjis")]
    ShiftJis,
    #[serde(rename = "gbk")]
    Gbk,
    #[serde(rename = "utf-8", alias = "utf8")]
    Utf8,
}

impl TextEncoding {
    #[inline]
    #[must_use]
    pub fn as_encoding_rs(self) -> &'static RsEncoding {
        match self {
            Self::ShiftJis => SHIFT_JIS,
            Self::Gbk => GBK,
            Self::Utf8 => UTF_8,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShiftJis => "shift_jis",
            Self::Gbk => "gbk",
            Self::Utf8 => "utf-8",
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoder/decoder bound to one legacy encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec {
    encoding: TextEncoding,
}

impl TextCodec {
    #[must_use]
    pub fn new(encoding: TextEncoding) -> Self {
        Self { encoding }
    }

    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Decode bytes, failing on any invalid sequence.
    ///
    /// `Shift_JIS` is limited to JIS X 0208: vendor extension rows are
    /// rejected and the result uses the JIS Unicode forms (`〜` for `81 60`).
    ///
    /// # Errors
    /// Returns [`Error::Decode`] if the bytes are not valid in this encoding.
    pub fn decode(&self, bytes: &[u8]) -> Result<String> {
        let error = || Error::Decode {
            encoding: self.encoding.as_str(),
            len: bytes.len(),
        };

        let text = self
            .encoding
            .as_encoding_rs()
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(error)?;

        match self.encoding {
            TextEncoding::ShiftJis => {
                if has_extension_bytes(bytes) {
                    return Err(error());
                }
                Ok(text.chars().map(to_jis_form).collect())
            }
            TextEncoding::Gbk | TextEncoding::Utf8 => Ok(text.into_owned()),
        }
    }

    /// Encode text, failing if any character has no representation.
    ///
    /// # Errors
    /// Returns [`Error::Encode`] if a character cannot be encoded.
    pub fn encode(&self, text: &str) -> Result<Vec<u8>> {
        self.encode_block("", text)
    }

    /// Like [`TextCodec::encode`], tagging a failure with the block identifier.
    pub(crate) fn encode_block(&self, id: &str, text: &str) -> Result<Vec<u8>> {
        let error = || Error::Encode {
            id: id.to_string(),
            encoding: self.encoding.as_str(),
            text: text.to_string(),
        };

        let encoding = self.encoding.as_encoding_rs();
        // encode() substitutes numeric character references for unmappable
        // characters and reports it through the flag
        let (bytes, _, had_errors) = encoding.encode(text);
        if self.encoding != TextEncoding::ShiftJis {
            return if had_errors { Err(error()) } else { Ok(bytes.into_owned()) };
        }
        if !had_errors && !has_extension_bytes(&bytes) {
            return Ok(bytes.into_owned());
        }

        let table_forms: String = text.chars().map(to_table_form).collect();
        let (bytes, _, had_errors) = encoding.encode(&table_forms);
        if had_errors || has_extension_bytes(&bytes) {
            return Err(error());
        }
        Ok(bytes.into_owned())
    }

    /// Heuristic: non-blank and representable in the legacy encoding.
    #[must_use]
    pub fn is_plausible_text(&self, text: &str) -> bool {
        !text.trim().is_empty() && self.encode(text).is_ok()
    }

    /// Decode a NUL-padded entry name. Never fails: bytes that do not decode
    /// fall back to ASCII with non-ASCII bytes dropped.
    #[must_use]
    pub fn decode_name(&self, raw: &[u8]) -> String {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        let raw = &raw[..end];
        self.decode(raw).unwrap_or_else(|_| {
            raw.iter()
                .filter(|b| b.is_ascii())
                .map(|&b| char::from(b))
                .collect()
        })
    }

    /// Encode an entry name. Never fails: names the encoding rejects fall
    /// back to ASCII with other characters dropped.
    #[must_use]
    pub fn encode_name(&self, name: &str) -> Vec<u8> {
        self.encode(name).unwrap_or_else(|_| {
            name.chars()
                .filter_map(|c| u8::try_from(c).ok())
                .filter(u8::is_ascii)
                .collect()
        })
    }
}

/// JIS X 0208 characters whose Unicode form differs between the JIS mapping
/// and the `encoding_rs` table, as (JIS form, table form)
const JIS_VARIANTS: [(char, char); 7] = [
    ('\u{301C}', '\u{FF5E}'), // wave dash
    ('\u{2016}', '\u{2225}'), // double vertical line
    ('\u{2212}', '\u{FF0D}'), // minus sign
    ('\u{00A2}', '\u{FFE0}'), // cent sign
    ('\u{00A3}', '\u{FFE1}'), // pound sign
    ('\u{00AC}', '\u{FFE2}'), // not sign
    ('\u{2014}', '\u{2015}'), // dash; decodes as U+2015 in both mappings
];

fn to_table_form(c: char) -> char {
    JIS_VARIANTS
        .iter()
        .find(|(jis, _)| *jis == c)
        .map_or(c, |&(_, table)| table)
}

fn to_jis_form(c: char) -> char {
    JIS_VARIANTS[..JIS_VARIANTS.len() - 1]
        .iter()
        .find(|(_, table)| *table == c)
        .map_or(c, |&(jis, _)| jis)
}

/// Whether well-formed `Shift_JIS` bytes use a lead byte outside JIS X 0208:
/// NEC row 13 (0x87), the NEC-selected IBM rows (0xED, 0xEE), user-defined
/// and IBM rows (0xF0 and up), or the lone bytes 0x80 and 0xA0
fn has_extension_bytes(bytes: &[u8]) -> bool {
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            0x80 | 0x87 | 0xA0 | 0xED | 0xEE | 0xF0..=0xFF => return true,
            0x81..=0x9F | 0xE0..=0xEF => i += 2,
            _ => i += 1,
        }
    }
    false
}
