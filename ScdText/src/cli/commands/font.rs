//! CLI commands for the font blob

use std::path::Path;

use crate::cli::progress::{DISK, LETTER, print_step};
use crate::config::ScdConfig;
use crate::font::{extract_font_file, reinsert_font_file};

/// Extract the font region to a file
pub fn extract(source: &Path, output: &Path, config: &ScdConfig) -> anyhow::Result<()> {
    let region = config.font_region();
    print_step(
        1,
        2,
        LETTER,
        &format!(
            "Reading 0x{:X} bytes at 0x{:X} from {}",
            region.size,
            region.offset,
            source.display()
        ),
    );
    let size = extract_font_file(&region, source, output)?;
    print_step(2, 2, DISK, &format!("Wrote {size} bytes to {}", output.display()));
    Ok(())
}

/// Reinsert a font file into the executable
pub fn insert(font: &Path, target: &Path, config: &ScdConfig) -> anyhow::Result<()> {
    let region = config.font_region();
    print_step(1, 2, LETTER, &format!("Inserting {}", font.display()));
    reinsert_font_file(&region, font, target)?;
    print_step(
        2,
        2,
        DISK,
        &format!(
            "Patched {} at 0x{:X} (region 0x{:X} bytes)",
            target.display(),
            region.offset,
            region.size
        ),
    );
    Ok(())
}
