//! Writing translated records back into scripts

use std::path::{Path, PathBuf};

use super::batch::{BatchResult, display_relative, find_json_files, recreate_dir, run_batch};
use super::progress::{Phase, Progress};
use crate::config::ScdConfig;
use crate::error::{Error, Result};
use crate::script::{BlockRewriter, read_blocks};
use crate::text::TextCodec;

/// What [`repack_file`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepackOutcome {
    /// The script was rewritten from this many records
    Rewritten { blocks: usize, translated: usize },
    /// No record file existed; the original was copied unchanged
    Copied,
}

/// Rewrite one script from its record file
///
/// # Errors
/// Returns [`Error::MissingInput`] if the original script is missing,
/// [`Error::JsonError`] if the records are malformed, or any rewrite error.
/// Nothing is written on error.
pub fn repack_file(
    original: &Path,
    json: &Path,
    output: &Path,
    codec: &TextCodec,
) -> Result<RepackOutcome> {
    if !original.is_file() {
        return Err(Error::MissingInput {
            path: original.to_path_buf(),
        });
    }
    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !json.is_file() {
        tracing::warn!(
            "No records for {}, copying original",
            original.display()
        );
        std::fs::copy(original, output)?;
        return Ok(RepackOutcome::Copied);
    }

    let data = std::fs::read(original)?;
    let blocks = read_blocks(json)?;
    let rewritten = BlockRewriter::new(*codec).rewrite(&data, &blocks)?;
    std::fs::write(output, &rewritten)?;

    let translated = blocks.iter().filter(|b| b.is_translated()).count();
    tracing::info!(
        "Rebuilt {} ({} of {} blocks translated)",
        output.display(),
        translated,
        blocks.len()
    );
    Ok(RepackOutcome::Rewritten {
        blocks: blocks.len(),
        translated,
    })
}

/// Repack every record file in the record directory.
///
/// `<json>/<rel>/<name>.json` pairs with `<unpacked>/<rel>/<name>` and is
/// written to `<repacked>/<rel>/<name>`. The output directory is recreated.
///
/// # Errors
/// Returns [`Error::MissingInput`] if the unpacked or record directory does
/// not exist, or an error if the output directory cannot be recreated.
pub fn repack_all<P>(config: &ScdConfig, progress: P) -> Result<BatchResult>
where
    P: Fn(&Progress) + Sync,
{
    for dir in [&config.paths.unpacked, &config.paths.json] {
        if !dir.is_dir() {
            return Err(Error::MissingInput { path: dir.clone() });
        }
    }

    recreate_dir(&config.paths.repacked)?;
    let records = find_json_files(&config.paths.json)?;
    let codec = config.codec();
    let json_dir = &config.paths.json;

    Ok(run_batch(
        &records,
        Phase::Repacking,
        &progress,
        |path| display_relative(path, json_dir),
        |path| {
            let relative = script_relative_path(path, json_dir)?;
            let original = config.paths.unpacked.join(&relative);
            let output = config.paths.repacked.join(&relative);

            match repack_file(&original, path, &output, &codec)? {
                RepackOutcome::Rewritten { blocks, translated } => Ok(format!(
                    "Repacked: {} ({translated}/{blocks} translated)",
                    relative.display()
                )),
                RepackOutcome::Copied => Ok(format!("Copied: {}", relative.display())),
            }
        },
    ))
}

/// `<json_dir>/<rel>/<name>.json` to `<rel>/<name>`
fn script_relative_path(record: &Path, json_dir: &Path) -> Result<PathBuf> {
    let invalid = || Error::InvalidPath(record.display().to_string());

    let relative = record.strip_prefix(json_dir).map_err(|_| invalid())?;
    let name = relative
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(".json"))
        .filter(|name| !name.is_empty())
        .ok_or_else(invalid)?;
    Ok(relative.with_file_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{BlockScanner, DIALOGUE_MARKER, write_blocks};
    use pretty_assertions::assert_eq;

    fn script() -> Vec<u8> {
        let mut data = vec![0x55];
        data.extend_from_slice(&DIALOGUE_MARKER);
        data.extend_from_slice(&6u16.to_le_bytes());
        data.extend_from_slice(b"Hello\0");
        data.extend_from_slice(b"\x99\x98");
        data
    }

    #[test]
    fn test_repack_file_applies_translation() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("talk");
        let json = dir.path().join("talk.json");
        let output = dir.path().join("out/talk");
        std::fs::write(&original, script()).unwrap();

        let blocks: Vec<_> = BlockScanner::default()
            .scan(&script())
            .into_iter()
            .map(|b| b.with_translation("Olá?"))
            .collect();
        write_blocks(&json, &blocks).unwrap();

        // "á" is outside Shift_JIS
        let err = repack_file(&original, &json, &output, &TextCodec::default()).unwrap_err();
        assert!(matches!(err, Error::Encode { .. }));
        assert!(!output.exists());

        let blocks: Vec<_> = blocks.into_iter().map(|b| b.with_translation("Hi")).collect();
        write_blocks(&json, &blocks).unwrap();
        let outcome = repack_file(&original, &json, &output, &TextCodec::default()).unwrap();
        assert_eq!(
            outcome,
            RepackOutcome::Rewritten {
                blocks: 1,
                translated: 1
            }
        );

        let mut expected = vec![0x55];
        expected.extend_from_slice(&DIALOGUE_MARKER);
        expected.extend_from_slice(&3u16.to_le_bytes());
        expected.extend_from_slice(b"Hi\0\x99\x98");
        assert_eq!(std::fs::read(&output).unwrap(), expected);
    }

    #[test]
    fn test_missing_records_copies_original() {
        let dir = tempfile::tempdir().unwrap();
        let original = dir.path().join("talk");
        let output = dir.path().join("out/talk");
        std::fs::write(&original, script()).unwrap();

        let outcome = repack_file(
            &original,
            &dir.path().join("none.json"),
            &output,
            &TextCodec::default(),
        )
        .unwrap();
        assert_eq!(outcome, RepackOutcome::Copied);
        assert_eq!(std::fs::read(&output).unwrap(), script());
    }

    #[test]
    fn test_missing_original_and_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let json = dir.path().join("talk.json");
        std::fs::write(&json, "{ broken").unwrap();
        let output = dir.path().join("out");

        assert!(matches!(
            repack_file(&dir.path().join("talk"), &json, &output, &TextCodec::default()),
            Err(Error::MissingInput { .. })
        ));

        std::fs::write(dir.path().join("talk"), script()).unwrap();
        assert!(matches!(
            repack_file(&dir.path().join("talk"), &json, &output, &TextCodec::default()),
            Err(Error::JsonError(_))
        ));
    }

    #[test]
    fn test_script_relative_path() {
        let path = script_relative_path(
            Path::new("json/ev01/a.bin.json"),
            Path::new("json"),
        )
        .unwrap();
        assert_eq!(path, PathBuf::from("ev01/a.bin"));
        assert!(script_relative_path(Path::new("json/.json"), Path::new("json")).is_err());
    }

    #[test]
    fn test_repack_all() {
        let dir = tempfile::tempdir().unwrap();
        let config = ScdConfig::default().with_root(dir.path());
        std::fs::create_dir_all(config.paths.unpacked.join("ev01")).unwrap();
        std::fs::write(config.paths.unpacked.join("ev01/talk"), script()).unwrap();

        let blocks: Vec<_> = BlockScanner::default()
            .scan(&script())
            .into_iter()
            .map(|b| b.with_translation("Yo"))
            .collect();
        write_blocks(config.paths.json.join("ev01/talk.json"), &blocks).unwrap();
        write_blocks(config.paths.json.join("ev01/gone.json"), &blocks).unwrap();

        let result = repack_all(&config, |_| {}).unwrap();
        assert_eq!(result.success_count, 1);
        assert_eq!(result.fail_count, 1);

        let output = std::fs::read(config.paths.repacked.join("ev01/talk")).unwrap();
        assert_eq!(&output[5..8], b"Yo\0");
    }
}
