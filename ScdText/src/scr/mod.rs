//! SCR script container (`.scd`) reader/writer
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! 0x00  magic "SCR\0"
//! 0x04  file count        u32
//! 0x08  data start offset u32
//! 0x0C  reserved          u32 (always 0)
//! 0x10  table: count x { name [u8; 12] (NUL-padded), relative offset u32 }
//!       data blob, each file at data start + relative offset
//! ```
//!
//! File sizes are not stored. Each file runs to the next entry's offset and
//! the last one to the end of the archive, so the table order is part of the
//! data and is preserved through [`FileOrder`].

mod manifest;
mod reader;
mod types;
mod writer;

pub use manifest::{FileOrder, MANIFEST_FILE_NAME};
pub use reader::{parse_scr_bytes, read_scr};
pub use types::*;
pub use writer::{ScrWriter, assemble_scr};

/// SCR magic bytes
pub const MAGIC: [u8; 4] = *b"SCR\0";

/// Size of the fixed header
pub const HEADER_SIZE: usize = 16;

/// Size of one file table entry
pub const TABLE_ENTRY_SIZE: usize = 16;

/// Length of the name field in a table entry
pub const NAME_LENGTH: usize = 12;
