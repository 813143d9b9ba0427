//! CLI commands for the directory pipeline stages

use std::time::Instant;

use console::Emoji;

use crate::cli::progress::{
    DISK, LOOKING_GLASS, PACKAGE, PENCIL, batch_bar, print_batch_summary, print_done,
    print_header, update_bar,
};
use crate::config::ScdConfig;
use crate::workflow::{BatchResult, Progress, dump_all, rebuild_all, repack_all, unpack_all};

/// Unpack every archive in the input directory
pub fn unpack(config: &ScdConfig, quiet: bool) -> anyhow::Result<()> {
    run_stage(
        PACKAGE,
        &format!(
            "Unpacking {} -> {}",
            config.paths.input.display(),
            config.paths.unpacked.display()
        ),
        "Archives",
        quiet,
        |progress| unpack_all(config, progress),
    )
}

/// Dump text blocks from every unpacked script
pub fn dump(config: &ScdConfig, quiet: bool) -> anyhow::Result<()> {
    run_stage(
        LOOKING_GLASS,
        &format!(
            "Dumping text {} -> {}",
            config.paths.unpacked.display(),
            config.paths.json.display()
        ),
        "Scripts",
        quiet,
        |progress| dump_all(config, progress),
    )
}

/// Write translations back into the scripts
pub fn repack(config: &ScdConfig, quiet: bool) -> anyhow::Result<()> {
    run_stage(
        PENCIL,
        &format!(
            "Repacking {} -> {}",
            config.paths.json.display(),
            config.paths.repacked.display()
        ),
        "Records",
        quiet,
        |progress| repack_all(config, progress),
    )
}

/// Rebuild every archive
pub fn rebuild(config: &ScdConfig, quiet: bool) -> anyhow::Result<()> {
    run_stage(
        DISK,
        &format!(
            "Rebuilding archives -> {}",
            config.paths.rebuilt.display()
        ),
        "Archives",
        quiet,
        |progress| rebuild_all(config, progress),
    )
}

fn run_stage<F>(
    emoji: Emoji<'_, '_>,
    message: &str,
    label: &str,
    quiet: bool,
    stage: F,
) -> anyhow::Result<()>
where
    F: FnOnce(&(dyn Fn(&Progress) + Sync)) -> crate::Result<BatchResult>,
{
    let started = Instant::now();
    print_header(emoji, message);

    let pb = batch_bar(quiet);
    let result = stage(&|progress: &Progress| update_bar(&pb, progress));
    pb.finish_and_clear();
    let result = result?;

    print_batch_summary(label, &result, !quiet);
    if result.total() == 0 {
        println!("  Nothing to do");
    }
    print_done(started.elapsed());

    if result.is_success() {
        Ok(())
    } else {
        anyhow::bail!("{} of {} items failed", result.fail_count, result.total())
    }
}
