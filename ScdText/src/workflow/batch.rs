//! Batch execution and file discovery
//!
//! Every directory-wide stage runs its items in parallel and collects one
//! message per item. A failing item is counted and reported, never aborting
//! the rest of the batch.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;
use walkdir::WalkDir;

use super::progress::{Phase, Progress};
use crate::error::Result;
use crate::scr::MANIFEST_FILE_NAME;

/// Result of a batch operation
#[derive(Debug, Clone, Default)]
pub struct BatchResult {
    /// Number of successful operations
    pub success_count: usize,
    /// Number of failed operations
    pub fail_count: usize,
    /// Messages for each item processed, in input order
    pub results: Vec<String>,
}

impl BatchResult {
    #[must_use]
    pub fn total(&self) -> usize {
        self.success_count + self.fail_count
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.fail_count == 0
    }
}

/// Run `op` over `items` in parallel.
///
/// `label` names an item for progress and messages; `op` returns the success
/// message.
pub(crate) fn run_batch<T, L, F, P>(
    items: &[T],
    phase: Phase,
    progress: &P,
    label: L,
    op: F,
) -> BatchResult
where
    T: Sync,
    L: Fn(&T) -> String + Sync,
    F: Fn(&T) -> Result<String> + Sync,
    P: Fn(&Progress) + Sync,
{
    let success_counter = AtomicUsize::new(0);
    let fail_counter = AtomicUsize::new(0);
    let processed = AtomicUsize::new(0);
    let total = items.len();

    let results: Vec<String> = items
        .par_iter()
        .map(|item| {
            let name = label(item);

            let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
            progress(&Progress::with_file(phase, current, total, name.clone()));

            match op(item) {
                Ok(message) => {
                    success_counter.fetch_add(1, Ordering::SeqCst);
                    message
                }
                Err(e) => {
                    fail_counter.fetch_add(1, Ordering::SeqCst);
                    tracing::error!("{} failed for {}: {}", phase.as_str(), name, e);
                    format!("Failed {name}: {e}")
                }
            }
        })
        .collect();

    BatchResult {
        success_count: success_counter.load(Ordering::SeqCst),
        fail_count: fail_counter.load(Ordering::SeqCst),
        results,
    }
}

/// Find `.scd` archives directly inside `dir` (extension matched
/// case-insensitively), sorted
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn find_scd_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("scd"))
        {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Find unpacked script files under `dir`, sorted, skipping file-order
/// manifests
///
/// # Errors
/// Returns an error if the directory tree cannot be read.
pub fn find_script_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    find_files(dir, |path| {
        path.file_name().is_none_or(|name| name != MANIFEST_FILE_NAME)
    })
}

/// Find `.json` record files under `dir`, sorted
///
/// # Errors
/// Returns an error if the directory tree cannot be read.
pub fn find_json_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    find_files(dir, |path| path.extension().is_some_and(|ext| ext == "json"))
}

/// Find the immediate subdirectories of `dir`, sorted
///
/// # Errors
/// Returns an error if the directory cannot be read.
pub fn find_archive_folders<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut folders = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            folders.push(entry.into_path());
        }
    }
    folders.sort();
    Ok(folders)
}

fn find_files<P, F>(dir: P, keep: F) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && keep(entry.path()) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Empty `dir`, creating it if needed
pub(crate) fn recreate_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)?;
    Ok(())
}

/// Path of `path` relative to `base` for display
pub(crate) fn display_relative(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string()
}
