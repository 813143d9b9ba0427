//! Dialogue text blocks inside extracted script files
//!
//! A block is a length-prefixed, NUL-terminated string preceded by the
//! two-byte dialogue marker, sitting anywhere in otherwise opaque bytecode:
//!
//! ```text
//! 0A 00 | size u16 LE | text bytes | 00
//! ```
//!
//! `size` counts the text bytes plus the terminator. The scanner finds blocks
//! heuristically; the rewriter puts edited text back while leaving every
//! other byte of the file untouched.

mod records;
mod rewriter;
mod scanner;

pub use records::{blocks_to_json, parse_blocks, read_blocks, write_blocks};
pub use rewriter::{BlockRewriter, rewrite_blocks};
pub use scanner::{BlockScanner, scan_blocks};

use serde::{Deserialize, Serialize};

/// Marker bytes that precede a block's size field
pub const DIALOGUE_MARKER: [u8; 2] = [0x0A, 0x00];

/// Width of the size field
pub const SIZE_FIELD_LEN: usize = 2;

/// A text block found in a script file
///
/// Serialized as one editable record of the JSON handed to translators.
/// `translated_text` is filled in by the translator; when it is missing or
/// blank the original text is written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Sequential identifier (`BLOCK_000`, `BLOCK_001`, ...)
    pub id: String,
    /// Offset of the size field in the original file
    pub size_address: usize,
    /// Low byte of the size field, as recorded by the original tooling
    pub original_block_size: u8,
    /// Decoded text as found in the file
    pub original_text: String,
    /// Full 16-bit size field. Absent in records from older tooling.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_size: Option<u16>,
    /// Replacement text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
}

impl Block {
    /// Create a block as found by the scanner
    #[must_use]
    pub fn new(index: usize, size_address: usize, block_size: u16, text: impl Into<String>) -> Self {
        Self {
            id: format!("BLOCK_{index:03}"),
            size_address,
            original_block_size: block_size.to_le_bytes()[0],
            original_text: text.into(),
            block_size: Some(block_size),
            translated_text: None,
        }
    }

    /// Set the replacement text
    #[must_use]
    pub fn with_translation(mut self, text: impl Into<String>) -> Self {
        self.translated_text = Some(text.into());
        self
    }

    /// Address of the dialogue marker, if the size field is not at the very
    /// start of the file
    #[must_use]
    pub fn marker_address(&self) -> Option<usize> {
        self.size_address.checked_sub(DIALOGUE_MARKER.len())
    }

    /// Payload length of the block in the original file.
    ///
    /// Uses the full size field when known, otherwise the legacy low byte.
    #[must_use]
    pub fn original_size(&self) -> usize {
        self.block_size
            .map_or(usize::from(self.original_block_size), usize::from)
    }

    /// End of the block (after its terminator) in the original file
    #[must_use]
    pub fn original_end(&self) -> usize {
        self.size_address + SIZE_FIELD_LEN + self.original_size()
    }

    /// Text to write back: the trimmed translation, or the original text
    /// when there is no usable translation
    #[must_use]
    pub fn effective_text(&self) -> &str {
        self.translated_text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .unwrap_or(&self.original_text)
    }

    /// Whether a non-blank translation is present
    #[must_use]
    pub fn is_translated(&self) -> bool {
        self.translated_text
            .as_deref()
            .is_some_and(|text| !text.trim().is_empty())
    }
}
