//! Unpacking `.scd` archives into folders

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use super::batch::{BatchResult, display_relative, find_scd_files, run_batch};
use super::progress::{Phase, Progress};
use crate::config::ScdConfig;
use crate::error::{Error, Result};
use crate::scr::{FileOrder, MANIFEST_FILE_NAME, ScrFile, read_scr};
use crate::text::TextCodec;

/// Split one archive into `out_base/<archive stem>/`, writing every entry and
/// the file-order manifest. Returns the folder written to.
///
/// Entries whose name is not a plain file name are extracted as `entry_NNN`
/// (their table index) and listed in the manifest under that name.
///
/// # Errors
/// Returns an error if the archive is invalid or a file cannot be written.
pub fn unpack_archive(scd_path: &Path, out_base: &Path, codec: &TextCodec) -> Result<PathBuf> {
    let archive = read_scr(scd_path, codec)?;
    let stem = scd_path
        .file_stem()
        .ok_or_else(|| Error::InvalidPath(scd_path.display().to_string()))?;
    let folder = out_base.join(stem);

    tracing::info!(
        "Unpacking {} ({} files, data at 0x{:X})",
        scd_path.display(),
        archive.len(),
        archive.header.data_offset
    );

    let names = extraction_names(&archive.files);

    std::fs::create_dir_all(&folder)?;
    FileOrder::new(names.clone()).write(folder.join(MANIFEST_FILE_NAME))?;

    let mut seen = HashSet::new();
    for (file, name) in archive.files.iter().zip(&names) {
        if !seen.insert(name.as_str()) {
            tracing::warn!("Duplicate entry '{}' overwrites an earlier one", name);
        }
        std::fs::write(folder.join(name), &file.data)?;
        tracing::debug!("Extracted '{}' ({} bytes)", name, file.data.len());
    }

    Ok(folder)
}

/// File name for each entry, in table order
fn extraction_names(files: &[ScrFile]) -> Vec<String> {
    let taken: HashSet<&str> = files.iter().map(|file| file.name.as_str()).collect();

    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            if check_entry_name(&file.name).is_ok() {
                return file.name.clone();
            }
            let mut name = format!("entry_{index:03}");
            while taken.contains(name.as_str()) {
                name.push('_');
            }
            tracing::warn!(
                "Entry {} has unsafe name {:?}, extracting as '{}'",
                index,
                file.name,
                name
            );
            name
        })
        .collect()
}

/// Unpack every archive in the configured input directory
///
/// # Errors
/// Returns [`Error::MissingInput`] if the input directory does not exist, or
/// an error if it cannot be listed. Per-archive failures are reported in the
/// [`BatchResult`].
pub fn unpack_all<P>(config: &ScdConfig, progress: P) -> Result<BatchResult>
where
    P: Fn(&Progress) + Sync,
{
    let input = &config.paths.input;
    if !input.is_dir() {
        return Err(Error::MissingInput {
            path: input.clone(),
        });
    }

    let archives = find_scd_files(input)?;
    if archives.is_empty() {
        tracing::warn!("No .scd files found in {}", input.display());
    }

    std::fs::create_dir_all(&config.paths.unpacked)?;
    let codec = config.codec();

    Ok(run_batch(
        &archives,
        Phase::Unpacking,
        &progress,
        |path| display_relative(path, input),
        |path| {
            let folder = unpack_archive(path, &config.paths.unpacked, &codec)?;
            Ok(format!(
                "Unpacked: {} -> {}",
                display_relative(path, input),
                folder.display()
            ))
        },
    ))
}

/// Entry names become file names; refuse anything that would leave the folder
/// or collide with the manifest
fn check_entry_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let plain = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !plain || name == MANIFEST_FILE_NAME {
        return Err(Error::InvalidPath(format!("unsafe entry name '{name}'")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scr::{HEADER_SIZE, NAME_LENGTH, TABLE_ENTRY_SIZE, assemble_scr};
    use pretty_assertions::assert_eq;

    fn write_archive(path: &Path, files: &[ScrFile]) {
        std::fs::write(path, assemble_scr(files, &TextCodec::default()).unwrap()).unwrap();
    }

    #[test]
    fn test_unpack_archive_writes_files_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let scd = dir.path().join("ev01.scd");
        write_archive(
            &scd,
            &[
                ScrFile::new("b.bin", b"second?".to_vec()),
                ScrFile::new("a.bin", b"first".to_vec()),
            ],
        );

        let out = dir.path().join("output");
        let folder = unpack_archive(&scd, &out, &TextCodec::default()).unwrap();

        assert_eq!(folder, out.join("ev01"));
        assert_eq!(std::fs::read(folder.join("a.bin")).unwrap(), b"first");
        assert_eq!(std::fs::read(folder.join("b.bin")).unwrap(), b"second?");
        let order = FileOrder::read(folder.join(MANIFEST_FILE_NAME)).unwrap();
        assert_eq!(order.names(), ["b.bin", "a.bin"]);
    }

    #[test]
    fn test_unsafe_entry_names_rejected() {
        assert!(check_entry_name("script.bin").is_ok());
        for name in ["", "..", "../x", "a/b", "/abs", MANIFEST_FILE_NAME] {
            assert!(
                matches!(check_entry_name(name), Err(Error::InvalidPath(_))),
                "{name}"
            );
        }
    }

    #[test]
    fn test_undecodable_name_does_not_block_extraction() {
        let dir = tempfile::tempdir().unwrap();
        let scd = dir.path().join("ev02.scd");
        let mut bytes = assemble_scr(
            &[
                ScrFile::new("first.bin", b"1".to_vec()),
                ScrFile::new("middle.bin", b"2".to_vec()),
                ScrFile::new("third.bin", b"3".to_vec()),
            ],
            &TextCodec::default(),
        )
        .unwrap();
        let name_start = HEADER_SIZE + TABLE_ENTRY_SIZE;
        let mut raw_name = [0u8; NAME_LENGTH];
        raw_name[..2].copy_from_slice(&[0xFF, 0xFF]);
        bytes[name_start..name_start + NAME_LENGTH].copy_from_slice(&raw_name);
        std::fs::write(&scd, bytes).unwrap();

        let folder = unpack_archive(&scd, dir.path(), &TextCodec::default()).unwrap();

        assert_eq!(std::fs::read(folder.join("first.bin")).unwrap(), b"1");
        assert_eq!(std::fs::read(folder.join("entry_001")).unwrap(), b"2");
        assert_eq!(std::fs::read(folder.join("third.bin")).unwrap(), b"3");
        let order = FileOrder::read(folder.join(MANIFEST_FILE_NAME)).unwrap();
        assert_eq!(order.names(), ["first.bin", "entry_001", "third.bin"]);
    }

    #[test]
    fn test_substitute_names_avoid_real_entries() {
        let files = [
            ScrFile::new("entry_000", b"a".to_vec()),
            ScrFile::new("..", b"b".to_vec()),
            ScrFile::new("", b"c".to_vec()),
        ];
        assert_eq!(
            extraction_names(&files),
            ["entry_000", "entry_001", "entry_002"]
        );

        let files = [
            ScrFile::new("", b"a".to_vec()),
            ScrFile::new("entry_000", b"b".to_vec()),
        ];
        assert_eq!(extraction_names(&files), ["entry_000_", "entry_000"]);
    }

    #[test]
    fn test_unpack_all() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScdConfig::default().with_root(dir.path());
        std::fs::create_dir_all(&config.paths.input).unwrap();

        write_archive(
            &config.paths.input.join("one.scd"),
            &[ScrFile::new("x", b"1".to_vec())],
        );
        write_archive(
            &config.paths.input.join("TWO.SCD"),
            &[ScrFile::new("y", b"2".to_vec())],
        );
        std::fs::write(config.paths.input.join("bad.scd"), b"NOPE").unwrap();

        let result = unpack_all(&config, |_| {}).unwrap();
        assert_eq!(result.success_count, 2);
        assert_eq!(result.fail_count, 1);
        assert!(config.paths.unpacked.join("one/x").is_file());
        assert!(config.paths.unpacked.join("TWO/y").is_file());
    }

    #[test]
    fn test_unpack_all_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScdConfig::default().with_root(dir.path());
        assert!(matches!(
            unpack_all(&config, |_| {}),
            Err(Error::MissingInput { .. })
        ));
    }
}
