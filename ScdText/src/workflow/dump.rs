//! Dumping script text to editable records

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::batch::{BatchResult, display_relative, find_script_files, recreate_dir, run_batch};
use super::progress::{Phase, Progress};
use crate::config::ScdConfig;
use crate::error::{Error, Result};
use crate::script::{Block, BlockScanner, write_blocks};

/// Scan one script and write its blocks to `json_out`.
///
/// Returns the number of blocks found. Nothing is written for files whose
/// stem is in the ignore list or that contain no blocks.
///
/// # Errors
/// Returns an error if the script cannot be read or the records cannot be
/// written.
pub fn dump_file(script: &Path, json_out: &Path, config: &ScdConfig) -> Result<usize> {
    if is_ignored(script, config) {
        tracing::info!("Skipping ignored file {}", script.display());
        return Ok(0);
    }

    let data = std::fs::read(script)?;
    let blocks = drop_overlapping(BlockScanner::new(config.codec()).scan(&data), script);
    if blocks.is_empty() {
        tracing::debug!("No text blocks in {}", script.display());
        return Ok(0);
    }

    write_blocks(json_out, &blocks)?;
    tracing::info!("{} blocks from {} saved", blocks.len(), script.display());
    Ok(blocks.len())
}

/// Dump every unpacked script into the record directory.
///
/// The record directory is recreated; `<unpacked>/<rel>` becomes
/// `<json>/<rel>.json`.
///
/// # Errors
/// Returns [`Error::MissingInput`] if the unpacked directory does not exist,
/// or an error if the output directory cannot be recreated.
pub fn dump_all<P>(config: &ScdConfig, progress: P) -> Result<BatchResult>
where
    P: Fn(&Progress) + Sync,
{
    let unpacked = &config.paths.unpacked;
    if !unpacked.is_dir() {
        return Err(Error::MissingInput {
            path: unpacked.clone(),
        });
    }

    recreate_dir(&config.paths.json)?;
    let scripts = find_script_files(unpacked)?;

    Ok(run_batch(
        &scripts,
        Phase::Dumping,
        &progress,
        |path| display_relative(path, unpacked),
        |path| {
            let display = display_relative(path, unpacked);
            if is_ignored(path, config) {
                return Ok(format!("Ignored: {display}"));
            }
            let json_out = record_path(path, unpacked, &config.paths.json)?;
            match dump_file(path, &json_out, config)? {
                0 => Ok(format!("No text: {display}")),
                count => Ok(format!("Dumped {count} blocks: {display}")),
            }
        },
    ))
}

/// `<base>/<rel>` to `<json_dir>/<rel>.json`
fn record_path(script: &Path, base: &Path, json_dir: &Path) -> Result<PathBuf> {
    let relative = script
        .strip_prefix(base)
        .map_err(|_| Error::InvalidPath(script.display().to_string()))?;
    let mut name = OsString::from(relative.as_os_str());
    name.push(".json");
    Ok(json_dir.join(name))
}

/// Keep only blocks the rewriter can apply: a block whose marker falls inside
/// the previous kept block's original span is dropped
fn drop_overlapping(blocks: Vec<Block>, script: &Path) -> Vec<Block> {
    let mut kept: Vec<Block> = Vec::with_capacity(blocks.len());
    for block in blocks {
        let end = kept.last().map_or(0, Block::original_end);
        if block.marker_address().is_none_or(|marker| marker < end) {
            tracing::warn!(
                "Dropping {} at 0x{:X} in {}: overlaps the previous block (ends at 0x{:X})",
                block.id,
                block.size_address,
                script.display(),
                end
            );
            continue;
        }
        kept.push(block);
    }
    kept
}

fn is_ignored(script: &Path, config: &ScdConfig) -> bool {
    script
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| config.is_ignored(stem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{BlockRewriter, DIALOGUE_MARKER, read_blocks};
    use pretty_assertions::assert_eq;

    fn script_with(text: &[u8]) -> Vec<u8> {
        let mut data = vec![0xFF, 0x01];
        data.extend_from_slice(&DIALOGUE_MARKER);
        data.extend_from_slice(&u16::try_from(text.len() + 1).unwrap().to_le_bytes());
        data.extend_from_slice(text);
        data.push(0);
        data
    }

    #[test]
    fn test_dump_file() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("ev01.bin");
        std::fs::write(&script, script_with(b"Hello")).unwrap();

        let json = dir.path().join("out/ev01.bin.json");
        let count = dump_file(&script, &json, &ScdConfig::default()).unwrap();
        assert_eq!(count, 1);

        let blocks = read_blocks(&json).unwrap();
        assert_eq!(blocks[0].size_address, 4);
        assert_eq!(blocks[0].original_text, "Hello");
    }

    #[test]
    fn test_dump_file_without_blocks_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("data.bin");
        std::fs::write(&script, [0u8; 32]).unwrap();

        let json = dir.path().join("data.bin.json");
        assert_eq!(dump_file(&script, &json, &ScdConfig::default()).unwrap(), 0);
        assert!(!json.exists());
    }

    #[test]
    fn test_ignored_stem() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("medium.bin");
        std::fs::write(&script, script_with(b"Hello")).unwrap();

        let json = dir.path().join("medium.bin.json");
        assert_eq!(dump_file(&script, &json, &ScdConfig::default()).unwrap(), 0);
        assert!(!json.exists());

        let config = ScdConfig::default().with_ignore(Vec::<String>::new());
        assert_eq!(dump_file(&script, &json, &config).unwrap(), 1);
    }

    #[test]
    fn test_overlapping_blocks_are_not_dumped() {
        // The first text ends in a newline, so its terminator reads as a marker
        let mut data = DIALOGUE_MARKER.to_vec();
        data.extend_from_slice(&4u16.to_le_bytes());
        data.extend_from_slice(b"Hi\n\0");
        data.extend_from_slice(&4u16.to_le_bytes());
        data.extend_from_slice(b"Yo!\0");
        assert_eq!(BlockScanner::default().scan(&data).len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("talk");
        std::fs::write(&script, &data).unwrap();
        let json = dir.path().join("talk.json");
        assert_eq!(dump_file(&script, &json, &ScdConfig::default()).unwrap(), 1);

        let blocks = read_blocks(&json).unwrap();
        assert_eq!(blocks[0].original_text, "Hi\n");
        let rewritten = BlockRewriter::default().rewrite(&data, &blocks).unwrap();
        assert_eq!(rewritten, data);
    }

    #[test]
    fn test_record_path() {
        let path = record_path(
            Path::new("output/ev01/a.bin"),
            Path::new("output"),
            Path::new("output_json"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("output_json/ev01/a.bin.json"));
    }

    #[test]
    fn test_dump_all_recreates_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScdConfig::default().with_root(dir.path());
        let folder = config.paths.unpacked.join("ev01");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("talk"), script_with(b"Hi there")).unwrap();
        std::fs::write(folder.join("empty"), b"").unwrap();
        std::fs::write(folder.join("_file_order.txt"), "talk\nempty\n").unwrap();

        std::fs::create_dir_all(&config.paths.json).unwrap();
        std::fs::write(config.paths.json.join("stale.json"), "[]").unwrap();

        let result = dump_all(&config, |_| {}).unwrap();
        assert_eq!(result.success_count, 2);
        assert_eq!(result.fail_count, 0);
        assert!(config.paths.json.join("ev01/talk.json").is_file());
        assert!(!config.paths.json.join("ev01/empty.json").exists());
        assert!(!config.paths.json.join("stale.json").exists());
    }
}
