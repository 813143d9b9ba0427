//! Block scanning
//!
//! Script files carry no index of their strings, so blocks are found by
//! looking for the dialogue marker and checking that what follows looks like
//! a real record. Every check failure just means "not a block"; scanning
//! never fails.

use super::{Block, DIALOGUE_MARKER, SIZE_FIELD_LEN};
use crate::text::TextCodec;

/// Finds dialogue blocks in a script buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockScanner {
    codec: TextCodec,
}

impl BlockScanner {
    #[must_use]
    pub fn new(codec: TextCodec) -> Self {
        Self { codec }
    }

    /// Scan the buffer, returning blocks in ascending address order.
    ///
    /// After each marker hit, accepted or not, scanning resumes one byte
    /// later, so markers inside a candidate's payload are still examined.
    #[must_use]
    pub fn scan(&self, data: &[u8]) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut cursor = 0;

        while let Some(marker) = find_marker(data, cursor) {
            if let Some((size, text)) = self.candidate_at(data, marker) {
                blocks.push(Block::new(
                    blocks.len(),
                    marker + DIALOGUE_MARKER.len(),
                    size,
                    text,
                ));
            }
            cursor = marker + 1;
        }

        tracing::debug!("Scanned {} bytes, found {} blocks", data.len(), blocks.len());
        blocks
    }

    /// Check the record behind a marker hit, returning its size field and text
    fn candidate_at(&self, data: &[u8], marker: usize) -> Option<(u16, String)> {
        let size_address = marker + DIALOGUE_MARKER.len();
        let payload_start = size_address + SIZE_FIELD_LEN;
        if payload_start > data.len() {
            return None;
        }

        let size = u16::from_le_bytes([data[size_address], data[size_address + 1]]);
        let payload_end = payload_start + usize::from(size);
        if size == 0 || payload_end > data.len() {
            tracing::trace!("0x{:X}: size {} out of range", marker, size);
            return None;
        }

        let payload = &data[payload_start..payload_end];
        let Some(nul) = payload.iter().position(|&b| b == 0) else {
            tracing::trace!("0x{:X}: no terminator", marker);
            return None;
        };

        let text_bytes = &payload[..nul];
        if text_bytes.iter().any(|&b| b < 0x20 && b != b'\t' && b != b'\n') {
            tracing::trace!("0x{:X}: control bytes in text", marker);
            return None;
        }

        let text = self.codec.decode(text_bytes).ok()?;
        if text.chars().count() <= 1 || !self.codec.is_plausible_text(&text) {
            tracing::trace!("0x{:X}: rejected text {:?}", marker, text);
            return None;
        }

        Some((size, text))
    }
}

/// Scan a script buffer for blocks
#[must_use]
pub fn scan_blocks(data: &[u8], codec: &TextCodec) -> Vec<Block> {
    BlockScanner::new(*codec).scan(data)
}

fn find_marker(data: &[u8], from: usize) -> Option<usize> {
    data.get(from..)?
        .windows(DIALOGUE_MARKER.len())
        .position(|window| window == DIALOGUE_MARKER)
        .map(|pos| from + pos)
}
