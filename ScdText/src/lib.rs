#![allow(non_snake_case)]
//! # ScdText
//!
//! A pure-Rust toolkit for translating games whose dialogue ships in `SCR`
//! script containers (`.scd`).
//!
//! ## Supported Formats
//!
//! - **SCR archives** - Split and reassemble `.scd` containers
//! - **Script text blocks** - Find `0A 00 | size | text | 00` dialogue records
//!   in script bytecode and write edited text back
//! - **Block records** - JSON files handed to translators
//! - **Font blob** - Extract and reinsert the font embedded in the executable
//!
//! ## Quick Start
//!
//! ### Working with SCR Archives
//!
//! ```no_run
//! use scdtext::scr::{read_scr, ScrWriter};
//! use scdtext::text::TextCodec;
//!
//! let codec = TextCodec::default();
//! let archive = read_scr("ev01.scd", &codec)?;
//! for file in &archive.files {
//!     println!("{} ({} bytes)", file.name, file.data.len());
//! }
//!
//! ScrWriter::new(codec)
//!     .with_files(archive.files)
//!     .write("ev01_copy.scd")?;
//! # Ok::<(), scdtext::Error>(())
//! ```
//!
//! ### Editing Script Text
//!
//! ```
//! use scdtext::script::{BlockRewriter, BlockScanner};
//!
//! let script = b"\x0A\x00\x03\x00AB\x00XYZ";
//! let blocks: Vec<_> = BlockScanner::default()
//!     .scan(script)
//!     .into_iter()
//!     .map(|block| block.with_translation("ABC"))
//!     .collect();
//!
//! let rewritten = BlockRewriter::default().rewrite(script, &blocks)?;
//! assert_eq!(rewritten, b"\x0A\x00\x04\x00ABC\x00XYZ");
//! # Ok::<(), scdtext::Error>(())
//! ```
//!
//! ### Running the Pipeline
//!
//! ```no_run
//! use scdtext::config::ScdConfig;
//! use scdtext::workflow::{dump_all, unpack_all};
//!
//! let config = ScdConfig::load_or_default("scdtext.toml")?;
//! let result = unpack_all(&config, |_| {})?;
//! println!("{} archives unpacked", result.success_count);
//! dump_all(&config, |_| {})?;
//! # Ok::<(), scdtext::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `scdtext` command-line binary

pub mod config;
pub mod error;
pub mod font;
pub mod scr;
pub mod script;
pub mod text;
pub mod workflow;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::ScdConfig;
    pub use crate::error::{Error, Result};
    pub use crate::font::{FontRegion, extract_font_file, reinsert_font_file};
    pub use crate::scr::{FileOrder, ScrArchive, ScrFile, ScrWriter, assemble_scr, parse_scr_bytes, read_scr};
    pub use crate::script::{Block, BlockRewriter, BlockScanner, rewrite_blocks, scan_blocks};
    pub use crate::text::{TextCodec, TextEncoding};

    pub use crate::workflow::{
        BatchResult, Phase, Progress,
        dump_all, rebuild_all, repack_all, unpack_all,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
