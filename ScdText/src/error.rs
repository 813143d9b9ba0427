//! Error types for `ScdText`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `ScdText` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== SCR Container Errors ====================
    /// The file is not a valid SCR archive (missing `SCR\0` magic).
    #[error("invalid SCR magic: expected SCR\\0, found {0:?}")]
    InvalidScrMagic([u8; 4]),

    /// The archive is shorter than its fixed 16-byte header.
    #[error("truncated SCR header: {len} bytes (need 16)")]
    TruncatedHeader {
        /// Length of the buffer that was read.
        len: usize,
    },

    /// The file table runs past the end of the archive.
    #[error("truncated SCR file table: {count} entries need {needed} bytes, archive has {len}")]
    TruncatedTable {
        /// Number of entries declared in the header.
        count: u32,
        /// Bytes needed for header and table.
        needed: usize,
        /// Length of the archive.
        len: usize,
    },

    /// A table entry points outside the archive.
    #[error("entry '{name}' range {start}..{end} is outside the archive ({len} bytes)")]
    EntryOutOfBounds {
        /// Decoded entry name.
        name: String,
        /// Absolute start offset.
        start: u64,
        /// Absolute end offset (exclusive).
        end: u64,
        /// Length of the archive.
        len: usize,
    },

    /// The archive being assembled does not fit the 32-bit table fields.
    #[error("SCR archive too large: {0}")]
    ArchiveTooLarge(String),

    // ==================== Text Encoding Errors ====================
    /// Bytes are not valid in the legacy text encoding.
    #[error("cannot decode {len} bytes as {encoding}")]
    Decode {
        /// Name of the encoding used.
        encoding: &'static str,
        /// Number of bytes that failed to decode.
        len: usize,
    },

    /// Text contains characters that the legacy encoding cannot represent.
    #[error("block '{id}' has characters not representable in {encoding}: {text}")]
    Encode {
        /// Block identifier (empty when encoding outside a block).
        id: String,
        /// Name of the encoding used.
        encoding: &'static str,
        /// The offending text.
        text: String,
    },

    // ==================== Script Block Errors ====================
    /// Blocks handed to the rewriter are not in ascending, non-overlapping order.
    #[error("block '{id}' marker at 0x{marker:X} precedes the end of the previous block (0x{cursor:X})")]
    BlockOrdering {
        /// Block identifier.
        id: String,
        /// Marker address of the offending block.
        marker: usize,
        /// Rewrite cursor (end of the previous block in the original buffer).
        cursor: usize,
    },

    /// A block's original span does not fit in the script buffer.
    #[error("block '{id}' at 0x{address:X} (size {size}) is outside the script ({len} bytes)")]
    BlockOutOfBounds {
        /// Block identifier.
        id: String,
        /// Size-field address of the block.
        address: usize,
        /// Original payload size.
        size: usize,
        /// Length of the script buffer.
        len: usize,
    },

    /// Encoded replacement text does not fit the 16-bit size field.
    #[error("block '{id}' text is {size} bytes, more than the size field can hold")]
    BlockTooLarge {
        /// Block identifier.
        id: String,
        /// Encoded text length including the terminator.
        size: usize,
    },

    // ==================== Workflow Errors ====================
    /// An expected input file or directory does not exist.
    #[error("input not found: {path}")]
    MissingInput {
        /// The missing path.
        path: PathBuf,
    },

    /// The file-order manifest is missing or lists no files.
    #[error("malformed file-order manifest {path}: {reason}")]
    MalformedManifest {
        /// Path of the manifest.
        path: PathBuf,
        /// What is wrong with it.
        reason: String,
    },

    // ==================== Font Errors ====================
    /// The replacement font is larger than the region reserved for it.
    #[error("font is {size} bytes, region allows {max}")]
    FontTooLarge {
        /// Size of the new font.
        size: usize,
        /// Size of the font region.
        max: usize,
    },

    /// The font region lies outside the binary.
    #[error("font region 0x{offset:X}+0x{size:X} is outside the binary ({len} bytes)")]
    FontOutOfBounds {
        /// Region start.
        offset: usize,
        /// Region size.
        size: usize,
        /// Length of the binary.
        len: usize,
    },

    // ==================== Parsing / Config Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML configuration parse error.
    #[error("config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Configuration values are invalid.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    // ==================== File System Errors ====================
    /// Invalid file path.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error.
    #[error("directory walk error: {0}")]
    WalkDirError(String),
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::WalkDirError(err.to_string())
    }
}

/// A specialized Result type for `ScdText` operations.
pub type Result<T> = std::result::Result<T, Error>;
