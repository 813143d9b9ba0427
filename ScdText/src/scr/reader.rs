//! SCR archive reading (split)

#![allow(clippy::cast_possible_truncation)]

use std::io::{Cursor, Read};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{HEADER_SIZE, MAGIC, NAME_LENGTH, ScrArchive, ScrEntry, ScrFile, ScrHeader, TABLE_ENTRY_SIZE};
use crate::error::{Error, Result};
use crate::text::TextCodec;

/// Read an SCR archive from disk
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or any error from
/// [`parse_scr_bytes`].
pub fn read_scr<P: AsRef<Path>>(path: P, codec: &TextCodec) -> Result<ScrArchive> {
    let data = std::fs::read(path)?;
    parse_scr_bytes(&data, codec)
}

/// Split SCR archive bytes into its header, table and files
///
/// Entry names that do not decode in the codec's encoding fall back to ASCII
/// instead of failing, so one bad name never blocks the other files.
///
/// # Errors
///
/// Returns [`Error::InvalidScrMagic`], [`Error::TruncatedHeader`] or
/// [`Error::TruncatedTable`] for structural problems, and
/// [`Error::EntryOutOfBounds`] if an entry's byte range is outside the buffer.
pub fn parse_scr_bytes(data: &[u8], codec: &TextCodec) -> Result<ScrArchive> {
    if data.len() < MAGIC.len() {
        return Err(Error::TruncatedHeader { len: data.len() });
    }

    let mut cursor = Cursor::new(data);

    let mut magic = [0u8; 4];
    cursor.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(Error::InvalidScrMagic(magic));
    }
    if data.len() < HEADER_SIZE {
        return Err(Error::TruncatedHeader { len: data.len() });
    }

    let file_count = cursor.read_u32::<LittleEndian>()?;
    let data_offset = cursor.read_u32::<LittleEndian>()?;
    let reserved = cursor.read_u32::<LittleEndian>()?;

    tracing::debug!(
        "SCR header: {} files, data at 0x{:X}, reserved {}",
        file_count,
        data_offset,
        reserved
    );

    let table_end = (file_count as usize)
        .saturating_mul(TABLE_ENTRY_SIZE)
        .saturating_add(HEADER_SIZE);
    if table_end > data.len() {
        return Err(Error::TruncatedTable {
            count: file_count,
            needed: table_end,
            len: data.len(),
        });
    }

    // Read the whole table first: each size depends on the next entry
    let mut entries = Vec::with_capacity(file_count as usize);
    for _ in 0..file_count {
        let mut name_bytes = [0u8; NAME_LENGTH];
        cursor.read_exact(&mut name_bytes)?;
        let offset = cursor.read_u32::<LittleEndian>()?;

        entries.push(ScrEntry {
            name: codec.decode_name(&name_bytes),
            offset,
        });
    }

    let archive_len = data.len() as u64;
    let mut files = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let start = u64::from(data_offset) + u64::from(entry.offset);
        let end = entries
            .get(i + 1)
            .map_or(archive_len, |next| u64::from(data_offset) + u64::from(next.offset));

        if start > end || end > archive_len {
            return Err(Error::EntryOutOfBounds {
                name: entry.name.clone(),
                start,
                end,
                len: data.len(),
            });
        }

        // Both bounds are <= data.len(), so they fit in usize
        let range = start as usize..end as usize;
        tracing::debug!("  {} at 0x{:X} ({} bytes)", entry.name, start, range.len());

        files.push(ScrFile {
            name: entry.name.clone(),
            data: data[range].to_vec(),
        });
    }

    Ok(ScrArchive {
        header: ScrHeader {
            magic,
            file_count,
            data_offset,
            reserved,
        },
        entries,
        files,
    })
}
