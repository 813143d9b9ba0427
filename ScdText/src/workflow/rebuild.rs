//! Rebuilding `.scd` archives from unpacked folders

use std::path::{Path, PathBuf};

use super::batch::{BatchResult, find_archive_folders, run_batch};
use super::progress::{Phase, Progress};
use crate::config::ScdConfig;
use crate::error::{Error, Result};
use crate::scr::{FileOrder, MANIFEST_FILE_NAME, ScrWriter};

/// Rebuild `<rebuilt>/<folder>.scd` from the folder's manifest.
///
/// Each listed file is taken from the repacked directory when present there,
/// otherwise from the unpacked one; files found in neither are skipped with a
/// warning. Returns the archive path, or `None` if no listed file was found.
///
/// # Errors
/// Returns [`Error::MalformedManifest`] if the manifest is missing or empty,
/// or an I/O error.
pub fn rebuild_archive(folder: &str, config: &ScdConfig) -> Result<Option<PathBuf>> {
    let original_folder = config.paths.unpacked.join(folder);
    let repacked_folder = config.paths.repacked.join(folder);
    let order = FileOrder::read(original_folder.join(MANIFEST_FILE_NAME))?;

    let mut writer = ScrWriter::new(config.codec());
    for name in order.iter().filter(|&name| name != MANIFEST_FILE_NAME) {
        let Some(source) = pick_source(name, &repacked_folder, &original_folder) else {
            tracing::warn!("'{}' not found for {}, skipping", name, folder);
            continue;
        };
        writer.add_file(name, std::fs::read(&source)?);
    }

    if writer.file_count() == 0 {
        tracing::warn!("No files to pack for {}, skipping", folder);
        return Ok(None);
    }

    let output = config.paths.rebuilt.join(format!("{folder}.scd"));
    let size = writer.write(&output)?;
    tracing::info!(
        "Created {} ({} files, {} bytes)",
        output.display(),
        writer.file_count(),
        size
    );
    Ok(Some(output))
}

/// Rebuild an archive for every folder in the unpacked directory
///
/// # Errors
/// Returns [`Error::MissingInput`] if the unpacked directory does not exist,
/// or an error if it cannot be listed.
pub fn rebuild_all<P>(config: &ScdConfig, progress: P) -> Result<BatchResult>
where
    P: Fn(&Progress) + Sync,
{
    let unpacked = &config.paths.unpacked;
    if !unpacked.is_dir() {
        return Err(Error::MissingInput {
            path: unpacked.clone(),
        });
    }

    std::fs::create_dir_all(&config.paths.rebuilt)?;
    let folders: Vec<String> = find_archive_folders(unpacked)?
        .iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect();

    Ok(run_batch(
        &folders,
        Phase::Rebuilding,
        &progress,
        String::clone,
        |folder| match rebuild_archive(folder, config)? {
            Some(path) => Ok(format!("Rebuilt: {}", path.display())),
            None => Ok(format!("Skipped (no files): {folder}")),
        },
    ))
}

fn pick_source(name: &str, repacked: &Path, original: &Path) -> Option<PathBuf> {
    [repacked.join(name), original.join(name)]
        .into_iter()
        .find(|path| path.is_file())
}
