//! CLI progress display utilities
//!
//! Step indicators for the pipeline stages and a progress bar fed by the
//! library's batch progress callbacks.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

use crate::workflow::{BatchResult, Progress};

// =============================================================================
// Emoji Constants (with ASCII fallbacks for terminals without emoji support)
// =============================================================================

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - for unpacking/packing archives
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Pencil - for text editing operations
pub static PENCIL: Emoji<'_, '_> = Emoji("✏️  ", "");
/// Letter - for font operations
pub static LETTER: Emoji<'_, '_> = Emoji("🔤 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Print a step indicator: `[1/2] 📦 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print a stage header: `📦 Message`
pub fn print_header(emoji: Emoji, msg: &str) {
    println!("{}{}", emoji, style(msg).bold());
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Progress bar style for batch stages
///
/// Format: `ev01.scd [████████░░░░░░░░] 50% (50/100)`
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {percent}% ({pos}/{len})")
        .expect("valid template")
        .progress_chars("##-")
}

/// Create a hidden-until-used bar for a batch stage
#[must_use]
pub fn batch_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(0);
    pb.set_style(bar_style());
    pb
}

/// Feed a batch progress update into a bar
pub fn update_bar(pb: &ProgressBar, progress: &Progress) {
    pb.set_length(progress.total as u64);
    pb.set_position(progress.current as u64);
    if let Some(ref name) = progress.current_file {
        pb.set_message(name.clone());
    }
}

/// Print the outcome of a batch stage, listing failures
pub fn print_batch_summary(label: &str, result: &BatchResult, detailed: bool) {
    println!(
        "  {label}: {} succeeded, {} failed",
        style(result.success_count).green(),
        if result.fail_count > 0 {
            style(result.fail_count).red()
        } else {
            style(result.fail_count).dim()
        }
    );

    for msg in &result.results {
        if msg.starts_with("Failed") {
            println!("    {}", style(msg).red());
        } else if detailed {
            println!("    {msg}");
        }
    }
}
