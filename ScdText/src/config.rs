//! Tool configuration (`scdtext.toml`)
//!
//! Every field has a default, so a missing file or a partial one is fine:
//!
//! ```toml
//! [paths]
//! input = "input"
//! unpacked = "output"
//! json = "output_json"
//! repacked = "repack_files"
//! rebuilt = "repacked_scd"
//!
//! [text]
//! encoding = "shift_jis"
//! ignore = ["medium"]
//!
//! [font]
//! offset = 556672
//! size = 474136
//! source = "arm9.bin"
//! file = "font.nftr"
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::font::FontRegion;
use crate::text::{TextCodec, TextEncoding};

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "scdtext.toml";

fn default_input() -> PathBuf {
    PathBuf::from("input")
}

fn default_unpacked() -> PathBuf {
    PathBuf::from("output")
}

fn default_json() -> PathBuf {
    PathBuf::from("output_json")
}

fn default_repacked() -> PathBuf {
    PathBuf::from("repack_files")
}

fn default_rebuilt() -> PathBuf {
    PathBuf::from("repacked_scd")
}

fn default_ignore() -> BTreeSet<String> {
    BTreeSet::from(["medium".to_string()])
}

fn default_font_offset() -> usize {
    0x87E80
}

fn default_font_size() -> usize {
    0x73C18
}

fn default_font_source() -> PathBuf {
    PathBuf::from("arm9.bin")
}

fn default_font_file() -> PathBuf {
    PathBuf::from("font.nftr")
}

/// Full configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScdConfig {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub text: TextSettings,
    #[serde(default)]
    pub font: FontSettings,
}

/// Working directories for each pipeline stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSettings {
    /// `.scd` archives to unpack
    #[serde(default = "default_input")]
    pub input: PathBuf,
    /// One folder per unpacked archive
    #[serde(default = "default_unpacked")]
    pub unpacked: PathBuf,
    /// Block records, mirroring `unpacked`
    #[serde(default = "default_json")]
    pub json: PathBuf,
    /// Rewritten scripts, mirroring `unpacked`
    #[serde(default = "default_repacked")]
    pub repacked: PathBuf,
    /// Rebuilt `.scd` archives
    #[serde(default = "default_rebuilt")]
    pub rebuilt: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input: default_input(),
            unpacked: default_unpacked(),
            json: default_json(),
            repacked: default_repacked(),
            rebuilt: default_rebuilt(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSettings {
    #[serde(default)]
    pub encoding: TextEncoding,
    /// File stems skipped when dumping
    #[serde(default = "default_ignore")]
    pub ignore: BTreeSet<String>,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::default(),
            ignore: default_ignore(),
        }
    }
}

/// Location of the font inside the executable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontSettings {
    #[serde(default = "default_font_offset")]
    pub offset: usize,
    #[serde(default = "default_font_size")]
    pub size: usize,
    /// Executable holding the font
    #[serde(default = "default_font_source")]
    pub source: PathBuf,
    /// Extracted font file
    #[serde(default = "default_font_file")]
    pub file: PathBuf,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            offset: default_font_offset(),
            size: default_font_size(),
            source: default_font_source(),
            file: default_font_file(),
        }
    }
}

impl ScdConfig {
    /// Parse a config from TOML text and validate it
    ///
    /// # Errors
    /// Returns [`Error::TomlError`] for invalid TOML or
    /// [`Error::InvalidConfig`] if validation fails.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config from {}", path.display());
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Load a config file if it exists, defaults otherwise
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be loaded.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize to TOML
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] if the config cannot be serialized.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    /// Check values that parse but cannot work
    ///
    /// # Errors
    /// Returns [`Error::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.font.size == 0 {
            return Err(Error::InvalidConfig("font size must not be zero".to_string()));
        }
        if self.font.offset.checked_add(self.font.size).is_none() {
            return Err(Error::InvalidConfig(format!(
                "font region 0x{:X} + 0x{:X} overflows",
                self.font.offset, self.font.size
            )));
        }
        Ok(())
    }

    /// Rebase every relative path onto `root`
    #[must_use]
    pub fn with_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        for path in [
            &mut self.paths.input,
            &mut self.paths.unpacked,
            &mut self.paths.json,
            &mut self.paths.repacked,
            &mut self.paths.rebuilt,
            &mut self.font.source,
            &mut self.font.file,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.text.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_ignore(mut self, stems: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.text.ignore = stems.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths.input = dir.into();
        self
    }

    #[must_use]
    pub fn with_unpacked_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths.unpacked = dir.into();
        self
    }

    #[must_use]
    pub fn with_json_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths.json = dir.into();
        self
    }

    #[must_use]
    pub fn with_repacked_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths.repacked = dir.into();
        self
    }

    #[must_use]
    pub fn with_rebuilt_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.paths.rebuilt = dir.into();
        self
    }

    #[must_use]
    pub fn with_font_region(mut self, offset: usize, size: usize) -> Self {
        self.font.offset = offset;
        self.font.size = size;
        self
    }

    /// Codec for the configured encoding
    #[must_use]
    pub fn codec(&self) -> TextCodec {
        TextCodec::new(self.text.encoding)
    }

    #[must_use]
    pub fn font_region(&self) -> FontRegion {
        FontRegion::new(self.font.offset, self.font.size)
    }

    /// Whether dumping skips a file with this stem
    #[must_use]
    pub fn is_ignored(&self, stem: &str) -> bool {
        self.text.ignore.contains(stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ScdConfig::default();
        assert_eq!(config.paths.unpacked, PathBuf::from("output"));
        assert_eq!(config.paths.rebuilt, PathBuf::from("repacked_scd"));
        assert_eq!(config.text.encoding, TextEncoding::ShiftJis);
        assert!(config.is_ignored("medium"));
        assert_eq!(config.font_region(), FontRegion::new(0x87E80, 0x73C18));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = ScdConfig::from_toml_str(
            r#"
            [paths]
            input = "roms/scd"

            [text]
            encoding = "sjis"
            ignore = []
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.input, PathBuf::from("roms/scd"));
        assert_eq!(config.paths.json, PathBuf::from("output_json"));
        assert!(!config.is_ignored("medium"));
        assert_eq!(config.font.size, 0x73C18);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ScdConfig::from_toml_str("").unwrap(), ScdConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ScdConfig::default()
            .with_encoding(TextEncoding::Gbk)
            .with_ignore(["medium", "debug"])
            .with_font_region(0x100, 0x200);

        let text = config.to_toml_string().unwrap();
        assert_eq!(ScdConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validation() {
        let err = ScdConfig::from_toml_str("[font]\nsize = 0").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        assert!(matches!(
            ScdConfig::from_toml_str("[text]\nencoding = \"latin1\""),
            Err(Error::TomlError(_))
        ));
    }

    #[test]
    fn test_with_root_rebases_relative_paths() {
        let config = ScdConfig::default()
            .with_json_dir("/abs/json")
            .with_root("/work");

        assert_eq!(config.paths.input, PathBuf::from("/work/input"));
        assert_eq!(config.paths.json, PathBuf::from("/abs/json"));
        assert_eq!(config.font.source, PathBuf::from("/work/arm9.bin"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(ScdConfig::load_or_default(&path).unwrap(), ScdConfig::default());

        std::fs::write(&path, "[paths]\nrebuilt = \"out\"\n").unwrap();
        let config = ScdConfig::load_or_default(&path).unwrap();
        assert_eq!(config.paths.rebuilt, PathBuf::from("out"));
    }
}
