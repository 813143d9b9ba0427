//! Block rewriting
//!
//! Rebuilds a script with edited block text. All addresses refer to the
//! original buffer: bytes between blocks are copied from the original and the
//! cursor skips each block's original span, so blocks that grow or shrink do
//! not shift where later copies start.

use super::{Block, DIALOGUE_MARKER};
use crate::error::{Error, Result};
use crate::text::TextCodec;

/// Writes edited blocks back into a script buffer
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockRewriter {
    codec: TextCodec,
}

impl BlockRewriter {
    #[must_use]
    pub fn new(codec: TextCodec) -> Self {
        Self { codec }
    }

    /// Produce a new script with each block's effective text written back.
    ///
    /// `blocks` must be in ascending address order with no block starting
    /// inside the previous one's original span; this is checked, not fixed.
    /// On error nothing is returned for the file.
    ///
    /// # Errors
    /// Returns [`Error::BlockOrdering`] for out-of-order or overlapping
    /// blocks, [`Error::BlockOutOfBounds`] if a block's original span does not
    /// fit in `original`, [`Error::Encode`] if a text cannot be encoded, and
    /// [`Error::BlockTooLarge`] if it no longer fits the size field.
    pub fn rewrite(&self, original: &[u8], blocks: &[Block]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(original.len());
        let mut cursor = 0usize;

        for block in blocks {
            let out_of_bounds = || Error::BlockOutOfBounds {
                id: block.id.clone(),
                address: block.size_address,
                size: block.original_size(),
                len: original.len(),
            };

            let marker = block.marker_address().ok_or_else(out_of_bounds)?;
            if marker < cursor {
                return Err(Error::BlockOrdering {
                    id: block.id.clone(),
                    marker,
                    cursor,
                });
            }
            let end = block.original_end();
            if end > original.len() {
                return Err(out_of_bounds());
            }

            output.extend_from_slice(&original[cursor..marker]);

            let text = self.codec.encode_block(&block.id, block.effective_text())?;
            let new_size: u16 = (text.len() + 1).try_into().map_err(|_| Error::BlockTooLarge {
                id: block.id.clone(),
                size: text.len() + 1,
            })?;

            output.extend_from_slice(&DIALOGUE_MARKER);
            output.extend_from_slice(&new_size.to_le_bytes());
            output.extend_from_slice(&text);
            output.push(0);

            cursor = end;
        }

        output.extend_from_slice(&original[cursor..]);
        Ok(output)
    }
}

/// Rewrite a script buffer with edited blocks
///
/// # Errors
/// See [`BlockRewriter::rewrite`].
pub fn rewrite_blocks(original: &[u8], blocks: &[Block], codec: &TextCodec) -> Result<Vec<u8>> {
    BlockRewriter::new(*codec).rewrite(original, blocks)
}
