//! Types for SCR container handling

use super::FileOrder;

/// Header of an SCR archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrHeader {
    /// Magic bytes ("SCR\0")
    pub magic: [u8; 4],
    /// Number of entries in the file table
    pub file_count: u32,
    /// Offset of the data blob from the start of the archive
    pub data_offset: u32,
    /// Reserved, written as zero
    pub reserved: u32,
}

/// Entry in the file table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrEntry {
    /// Decoded name (at most 12 bytes in the archive)
    pub name: String,
    /// Offset of the file data relative to the data start
    pub offset: u32,
}

/// A named file stored in (or destined for) an SCR archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl ScrFile {
    #[must_use]
    pub fn new(name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// Result of splitting an SCR archive
#[derive(Debug, Clone)]
pub struct ScrArchive {
    pub header: ScrHeader,
    /// Table entries in archive order
    pub entries: Vec<ScrEntry>,
    /// File contents, same order as `entries`
    pub files: Vec<ScrFile>,
}

impl ScrArchive {
    /// Names in table order. Persist this to rebuild the table later.
    #[must_use]
    pub fn file_order(&self) -> FileOrder {
        FileOrder::new(self.entries.iter().map(|e| e.name.clone()).collect())
    }

    /// First file with the given name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ScrFile> {
        self.files.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
