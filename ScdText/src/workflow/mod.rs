//! Directory-level translation pipeline
//!
//! The stages run in order, each reading the previous stage's directory from
//! [`ScdConfig`](crate::config::ScdConfig):
//!
//! 1. [`unpack_all`]: `input/*.scd` to `output/<archive>/` plus a file-order
//!    manifest
//! 2. [`dump_all`]: `output/**` to `output_json/**.json` block records
//! 3. [`repack_all`]: records plus originals to `repack_files/**`
//! 4. [`rebuild_all`]: manifests plus repacked (or original) files to
//!    `repacked_scd/<archive>.scd`

mod batch;
mod dump;
mod progress;
mod rebuild;
mod repack;
mod unpack;

pub use batch::{BatchResult, find_archive_folders, find_json_files, find_scd_files, find_script_files};
pub use dump::{dump_all, dump_file};
pub use progress::{Phase, Progress};
pub use rebuild::{rebuild_all, rebuild_archive};
pub use repack::{RepackOutcome, repack_all, repack_file};
pub use unpack::{unpack_all, unpack_archive};
