//! CLI commands for inspecting single archives and scripts

use std::path::Path;

use crate::config::ScdConfig;
use crate::scr::read_scr;
use crate::script::{BlockScanner, write_blocks};

/// List the entries of an archive
pub fn list(source: &Path, config: &ScdConfig, detailed: bool) -> anyhow::Result<()> {
    let archive = read_scr(source, &config.codec())?;

    if !detailed {
        for file in &archive.files {
            println!("{}", file.name);
        }
        return Ok(());
    }

    println!("Archive: {}", source.display());
    println!("Files: {}", archive.len());
    println!("Data offset: 0x{:X}", archive.header.data_offset);
    println!();
    println!("  {:<12}  {:>10}  {:>10}", "Name", "Offset", "Size");
    for (entry, file) in archive.entries.iter().zip(&archive.files) {
        println!(
            "  {:<12}  {:>#10X}  {:>10}",
            file.name,
            entry.offset,
            file.data.len()
        );
    }

    Ok(())
}

/// Show or save the text blocks of one script
pub fn scan(source: &Path, output: Option<&Path>, config: &ScdConfig) -> anyhow::Result<()> {
    let data = std::fs::read(source)?;
    let blocks = BlockScanner::new(config.codec()).scan(&data);

    if let Some(output) = output {
        write_blocks(output, &blocks)?;
        println!("Saved {} blocks to {}", blocks.len(), output.display());
        return Ok(());
    }

    for block in &blocks {
        println!(
            "{}  0x{:06X}  {:>5}  {}",
            block.id,
            block.size_address,
            block.original_size(),
            block.original_text.replace('\n', "\\n")
        );
    }
    println!();
    println!("{} blocks in {}", blocks.len(), source.display());

    Ok(())
}
