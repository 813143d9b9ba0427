//! SCR archive writing (assemble)

use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{HEADER_SIZE, MAGIC, NAME_LENGTH, ScrFile, TABLE_ENTRY_SIZE};
use crate::error::{Error, Result};
use crate::text::TextCodec;

/// SCR archive writer
///
/// Files are written in the order they are added, which is also the table
/// order. Duplicate names are kept as given.
pub struct ScrWriter {
    codec: TextCodec,
    files: Vec<ScrFile>,
}

impl ScrWriter {
    #[must_use]
    pub fn new(codec: TextCodec) -> Self {
        Self {
            codec,
            files: Vec::new(),
        }
    }

    /// Append a file after the ones already added
    pub fn add_file(&mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.files.push(ScrFile::new(name, data));
    }

    /// Append several files, keeping their order
    #[must_use]
    pub fn with_files(mut self, files: impl IntoIterator<Item = ScrFile>) -> Self {
        self.files.extend(files);
        self
    }

    /// Get the number of files that will be written
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Build the archive in memory
    ///
    /// # Errors
    /// Returns [`Error::ArchiveTooLarge`] if the count or an offset does not
    /// fit in 32 bits.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        assemble_scr(&self.files, &self.codec)
    }

    /// Build the archive and write it to disk, creating parent directories
    ///
    /// # Errors
    /// Returns an error if assembling fails or the file cannot be written.
    pub fn write(&self, output_path: impl AsRef<Path>) -> Result<usize> {
        let output_path = output_path.as_ref();
        let bytes = self.to_bytes()?;

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_path, &bytes)?;

        Ok(bytes.len())
    }
}

/// Assemble named buffers into SCR archive bytes
///
/// Names longer than 12 bytes in the legacy encoding are truncated with a
/// warning; names the encoding cannot represent fall back to ASCII.
///
/// # Errors
/// Returns [`Error::ArchiveTooLarge`] if the count or an offset does not fit
/// in 32 bits.
pub fn assemble_scr(files: &[ScrFile], codec: &TextCodec) -> Result<Vec<u8>> {
    let file_count: u32 = files
        .len()
        .try_into()
        .map_err(|_| Error::ArchiveTooLarge(format!("too many files: {}", files.len())))?;

    let data_start = HEADER_SIZE + TABLE_ENTRY_SIZE * files.len();
    let data_len: usize = files.iter().map(|f| f.data.len()).sum();
    let data_offset: u32 = data_start
        .try_into()
        .map_err(|_| Error::ArchiveTooLarge(format!("file table ends at {data_start}")))?;

    let mut output = Vec::with_capacity(data_start + data_len);

    // Header
    output.write_all(&MAGIC)?;
    output.write_u32::<LittleEndian>(file_count)?;
    output.write_u32::<LittleEndian>(data_offset)?;
    output.write_u32::<LittleEndian>(0)?;

    // File table
    let mut relative_offset = 0usize;
    for file in files {
        let mut name = codec.encode_name(&file.name);
        if name.len() > NAME_LENGTH {
            tracing::warn!(
                "File name '{}' is longer than {} bytes and will be truncated",
                file.name,
                NAME_LENGTH
            );
        }
        name.resize(NAME_LENGTH, 0);
        output.write_all(&name)?;

        let offset: u32 = relative_offset.try_into().map_err(|_| {
            Error::ArchiveTooLarge(format!("offset of '{}' is {relative_offset}", file.name))
        })?;
        output.write_u32::<LittleEndian>(offset)?;

        relative_offset += file.data.len();
    }

    // Data blob
    for file in files {
        output.write_all(&file.data)?;
    }

    tracing::debug!(
        "Assembled SCR: {} files, {} bytes",
        files.len(),
        output.len()
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scr::parse_scr_bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_assemble_layout() {
        let codec = TextCodec::default();
        let files = vec![ScrFile::new("a.bin", b"HELLO".to_vec())];
        let bytes = assemble_scr(&files, &codec).unwrap();

        let mut expected = Vec::new();
        expected.extend_from_slice(b"SCR\0");
        expected.extend_from_slice(&1u32.to_le_bytes());
        expected.extend_from_slice(&32u32.to_le_bytes());
        expected.extend_from_slice(&0u32.to_le_bytes());
        expected.extend_from_slice(b"a.bin\0\0\0\0\0\0\0");
        expected.extend_from_slice(&0u32.to_le_bytes());
        expected.extend_from_slice(b"HELLO");

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_offsets_accumulate() {
        let mut writer = ScrWriter::new(TextCodec::default());
        writer.add_file("one", b"abc".to_vec());
        writer.add_file("empty", Vec::new());
        writer.add_file("two", b"defg".to_vec());
        assert_eq!(writer.file_count(), 3);

        let bytes = writer.to_bytes().unwrap();
        let scr = parse_scr_bytes(&bytes, &TextCodec::default()).unwrap();

        assert_eq!(scr.header.data_offset, 64);
        let offsets: Vec<u32> = scr.entries.iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0, 3, 3]);
        assert_eq!(scr.get("two").unwrap().data, b"defg");
    }

    #[test]
    fn test_long_name_is_truncated() {
        let files = vec![ScrFile::new("averyverylongname.bin", b"x".to_vec())];
        let bytes = assemble_scr(&files, &TextCodec::default()).unwrap();
        assert_eq!(&bytes[16..28], b"averyverylon");

        let scr = parse_scr_bytes(&bytes, &TextCodec::default()).unwrap();
        assert_eq!(scr.files[0].name, "averyverylon");
    }

    #[test]
    fn test_duplicate_names_preserved() {
        let files = vec![
            ScrFile::new("same", b"1".to_vec()),
            ScrFile::new("same", b"22".to_vec()),
        ];
        let bytes = assemble_scr(&files, &TextCodec::default()).unwrap();
        let scr = parse_scr_bytes(&bytes, &TextCodec::default()).unwrap();

        assert_eq!(scr.files, files);
    }

    #[test]
    fn test_empty_archive() {
        let bytes = ScrWriter::new(TextCodec::default()).to_bytes().unwrap();
        assert_eq!(bytes.len(), HEADER_SIZE);
        assert!(parse_scr_bytes(&bytes, &TextCodec::default()).unwrap().is_empty());
    }
}
