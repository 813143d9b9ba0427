//! File-order manifest (`_file_order.txt`)
//!
//! The SCR table has no size fields, so rebuilding an archive needs the
//! original entry order. Unpacking writes it next to the extracted files, one
//! name per line, and rebuilding reads it back.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::{Error, Result};

/// Name of the manifest written into each unpacked archive folder
pub const MANIFEST_FILE_NAME: &str = "_file_order.txt";

/// Ordered list of entry names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileOrder {
    names: Vec<String>,
}

impl FileOrder {
    #[must_use]
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parse manifest text. Lines are trimmed and blank lines skipped.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self {
            names: text
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Read a manifest from disk
    ///
    /// # Errors
    /// Returns [`Error::MalformedManifest`] if the file is missing or lists
    /// no names, or [`Error::Io`] if it cannot be read.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MalformedManifest {
                path: path.to_path_buf(),
                reason: "file not found".to_string(),
            });
        }

        let order = Self::parse(&std::fs::read_to_string(path)?);
        if order.is_empty() {
            return Err(Error::MalformedManifest {
                path: path.to_path_buf(),
                reason: "no file names listed".to_string(),
            });
        }
        Ok(order)
    }

    /// Write the manifest, one name per line
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_text())?;
        Ok(())
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        self.names.iter().fold(String::new(), |mut out, name| {
            let _ = writeln!(out, "{name}");
            out
        })
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
