//! Font blob embedded in the game executable
//!
//! The font is a fixed-size region at a fixed offset. Extraction copies the
//! region out; reinsertion writes a replacement over it and zero-fills
//! whatever the replacement does not cover.

use std::path::Path;

use crate::error::{Error, Result};

/// Fixed byte region holding the font
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontRegion {
    pub offset: usize,
    pub size: usize,
}

impl FontRegion {
    #[must_use]
    pub const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// End of the region (exclusive)
    #[must_use]
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }

    /// Borrow the font bytes
    ///
    /// # Errors
    /// Returns [`Error::FontOutOfBounds`] if the region does not fit in `bin`.
    pub fn extract<'a>(&self, bin: &'a [u8]) -> Result<&'a [u8]> {
        bin.get(self.offset..self.end())
            .ok_or(Error::FontOutOfBounds {
                offset: self.offset,
                size: self.size,
                len: bin.len(),
            })
    }

    /// Write `font` into the region, zero-padding the remainder.
    ///
    /// A target shorter than the region is extended with zeros first.
    ///
    /// # Errors
    /// Returns [`Error::FontTooLarge`] if `font` is bigger than the region.
    pub fn reinsert(&self, bin: &mut Vec<u8>, font: &[u8]) -> Result<()> {
        if font.len() > self.size {
            return Err(Error::FontTooLarge {
                size: font.len(),
                max: self.size,
            });
        }

        if bin.len() < self.end() {
            tracing::warn!(
                "Target is {} bytes, extending to 0x{:X} to fit the font region",
                bin.len(),
                self.end()
            );
            bin.resize(self.end(), 0);
        }

        let region = &mut bin[self.offset..self.end()];
        region[..font.len()].copy_from_slice(font);
        region[font.len()..].fill(0);
        Ok(())
    }
}

/// Copy the font region of `source` into `output`
///
/// # Errors
/// Returns an error if `source` cannot be read, is too short, or `output`
/// cannot be written.
pub fn extract_font_file(
    region: &FontRegion,
    source: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<usize> {
    let bin = std::fs::read(source.as_ref())?;
    let font = region.extract(&bin)?;

    if let Some(parent) = output.as_ref().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output.as_ref(), font)?;

    tracing::info!(
        "Extracted {} font bytes from 0x{:X} to {}",
        font.len(),
        region.offset,
        output.as_ref().display()
    );
    Ok(font.len())
}

/// Overwrite the font region of `target` in place with the contents of `font`
///
/// # Errors
/// Returns [`Error::MissingInput`] if either file is missing,
/// [`Error::FontTooLarge`] if the font does not fit, or an I/O error.
pub fn reinsert_font_file(
    region: &FontRegion,
    font: impl AsRef<Path>,
    target: impl AsRef<Path>,
) -> Result<()> {
    for path in [font.as_ref(), target.as_ref()] {
        if !path.is_file() {
            return Err(Error::MissingInput {
                path: path.to_path_buf(),
            });
        }
    }

    let font_data = std::fs::read(font.as_ref())?;
    let mut bin = std::fs::read(target.as_ref())?;
    region.reinsert(&mut bin, &font_data)?;
    std::fs::write(target.as_ref(), &bin)?;

    tracing::info!(
        "Reinserted {} font bytes at 0x{:X} into {}",
        font_data.len(),
        region.offset,
        target.as_ref().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REGION: FontRegion = FontRegion::new(4, 8);

    #[test]
    fn test_extract() {
        let bin: Vec<u8> = (0..16).collect();
        assert_eq!(REGION.extract(&bin).unwrap(), &[4, 5, 6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_extract_out_of_bounds() {
        let bin = vec![0u8; 10];
        assert!(matches!(
            REGION.extract(&bin),
            Err(Error::FontOutOfBounds { len: 10, .. })
        ));
    }

    #[test]
    fn test_reinsert_pads_with_zeros() {
        let mut bin = vec![0xAAu8; 16];
        REGION.reinsert(&mut bin, &[1, 2, 3]).unwrap();

        let mut expected = vec![0xAA; 4];
        expected.extend_from_slice(&[1, 2, 3, 0, 0, 0, 0, 0]);
        expected.extend_from_slice(&[0xAA; 4]);
        assert_eq!(bin, expected);
    }

    #[test]
    fn test_reinsert_too_large() {
        let mut bin = vec![0u8; 16];
        let err = REGION.reinsert(&mut bin, &[1; 9]).unwrap_err();
        assert!(matches!(err, Error::FontTooLarge { size: 9, max: 8 }));
        assert_eq!(bin, vec![0u8; 16]);
    }

    #[test]
    fn test_reinsert_extends_short_target() {
        let mut bin = vec![0xFFu8; 6];
        REGION.reinsert(&mut bin, &[7; 8]).unwrap();
        assert_eq!(bin.len(), 12);
        assert_eq!(&bin[..4], &[0xFF; 4]);
        assert_eq!(&bin[4..], &[7; 8]);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let bin_path = dir.path().join("arm9.bin");
        let font_path = dir.path().join("font.nftr");
        std::fs::write(&bin_path, (0u8..16).collect::<Vec<_>>()).unwrap();

        assert_eq!(extract_font_file(&REGION, &bin_path, &font_path).unwrap(), 8);
        assert_eq!(std::fs::read(&font_path).unwrap(), (4u8..12).collect::<Vec<_>>());

        std::fs::write(&font_path, b"NFTR").unwrap();
        reinsert_font_file(&REGION, &font_path, &bin_path).unwrap();
        let bin = std::fs::read(&bin_path).unwrap();
        assert_eq!(&bin[4..12], b"NFTR\0\0\0\0");
        assert_eq!(&bin[12..], &[12, 13, 14, 15]);

        assert!(matches!(
            reinsert_font_file(&REGION, dir.path().join("none"), &bin_path),
            Err(Error::MissingInput { .. })
        ));
    }
}
