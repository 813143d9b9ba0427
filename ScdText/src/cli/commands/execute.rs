//! Command execution implementations

use super::Commands;
use super::definitions::FontCommands;
use super::{archive, font, pipeline};
use crate::config::ScdConfig;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self, config: &ScdConfig) -> anyhow::Result<()> {
        match self {
            Commands::Unpack { quiet } => pipeline::unpack(config, *quiet),
            Commands::Dump { quiet } => pipeline::dump(config, *quiet),
            Commands::Repack { quiet } => pipeline::repack(config, *quiet),
            Commands::Rebuild { quiet } => pipeline::rebuild(config, *quiet),
            Commands::List { source, detailed } => archive::list(source, config, *detailed),
            Commands::Scan { source, output } => archive::scan(source, output.as_deref(), config),
            Commands::Font { command } => command.execute(config),
        }
    }
}

impl FontCommands {
    /// Execute the selected font command.
    ///
    /// # Errors
    /// Returns an error if the font cannot be extracted or inserted.
    pub fn execute(&self, config: &ScdConfig) -> anyhow::Result<()> {
        match self {
            FontCommands::Extract { source, output } => font::extract(
                source.as_deref().unwrap_or(config.font.source.as_path()),
                output.as_deref().unwrap_or(config.font.file.as_path()),
                config,
            ),
            FontCommands::Insert { font, target } => font::insert(
                font.as_deref().unwrap_or(config.font.file.as_path()),
                target.as_deref().unwrap_or(config.font.source.as_path()),
                config,
            ),
        }
    }
}
