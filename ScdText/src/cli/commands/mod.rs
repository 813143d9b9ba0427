use clap::Subcommand;
use std::path::PathBuf;

pub mod archive;
pub mod definitions;
pub mod execute;
pub mod font;
pub mod pipeline;

use definitions::FontCommands;

#[derive(Subcommand)]
pub enum Commands {
    /// Unpack every .scd archive in the input directory
    Unpack {
        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Dump script text blocks to JSON records
    Dump {
        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Write translated JSON records back into the scripts
    Repack {
        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// Rebuild .scd archives from the unpacked and repacked files
    Rebuild {
        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List the entries of an .scd archive
    List {
        /// Archive file
        source: PathBuf,

        /// Show offsets and sizes
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show the text blocks found in a script file
    Scan {
        /// Script file
        source: PathBuf,

        /// Write the blocks as JSON records instead of printing them
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract or reinsert the font blob
    Font {
        #[command(subcommand)]
        command: FontCommands,
    },
}
