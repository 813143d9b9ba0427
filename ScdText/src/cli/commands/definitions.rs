//! Subcommand enum definitions for CLI

use clap::Subcommand;
use std::path::PathBuf;

/// Font blob commands
#[derive(Subcommand)]
pub enum FontCommands {
    /// Copy the font region out of the executable
    Extract {
        /// Executable holding the font (config `font.source` if omitted)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Output font file (config `font.file` if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a font back into the executable's font region, in place
    Insert {
        /// Font file to insert (config `font.file` if omitted)
        #[arg(short, long)]
        font: Option<PathBuf>,

        /// Executable to patch (config `font.source` if omitted)
        #[arg(short, long)]
        target: Option<PathBuf>,
    },
}
