//! Editable block records (JSON)
//!
//! One JSON array per script file, one object per block. Translators fill in
//! `translated_text`; every other field must be left as dumped.
//!
//! ```json
//! [
//!     {
//!         "id": "BLOCK_000",
//!         "size_address": 2,
//!         "original_block_size": 6,
//!         "original_text": "AB",
//!         "block_size": 6,
//!         "translated_text": "ABC"
//!     }
//! ]
//! ```

use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use super::Block;
use crate::error::Result;

const JSON_INDENT: &[u8] = b"    ";

/// Parse a JSON record array
///
/// # Errors
/// Returns [`crate::Error::JsonError`] if the text is not a valid record array.
pub fn parse_blocks(json: &str) -> Result<Vec<Block>> {
    Ok(serde_json::from_str(json)?)
}

/// Serialize blocks as an indented JSON array. Non-ASCII text is written as-is.
///
/// # Errors
/// Returns [`crate::Error::JsonError`] if serialization fails.
pub fn blocks_to_json(blocks: &[Block]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    blocks.serialize(&mut serializer)?;
    // serde_json only ever emits UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Read a record file
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_blocks<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    let content = std::fs::read_to_string(path)?;
    parse_blocks(&content)
}

/// Write a record file, creating parent directories
///
/// # Errors
/// Returns an error if serialization or writing fails.
pub fn write_blocks<P: AsRef<Path>>(path: P, blocks: &[Block]) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, blocks_to_json(blocks)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_layout() {
        let blocks = vec![Block::new(0, 2, 6, "「はい」")];
        let json = blocks_to_json(&blocks).unwrap();

        assert!(json.starts_with("[\n    {\n        \"id\": \"BLOCK_000\""));
        assert!(json.contains("\"original_text\": \"「はい」\""));
        assert!(!json.contains("translated_text"));
        assert_eq!(parse_blocks(&json).unwrap(), blocks);
    }

    #[test]
    fn test_legacy_records_parse() {
        let json = r#"[
            {
                "id": "BLOCK_000",
                "size_address": 2,
                "original_block_size": 6,
                "original_text": "AB",
                "translated_text": "ABC"
            }
        ]"#;

        let blocks = parse_blocks(json).unwrap();
        assert_eq!(blocks[0].block_size, None);
        assert_eq!(blocks[0].original_size(), 6);
        assert_eq!(blocks[0].effective_text(), "ABC");
    }

    #[test]
    fn test_translated_text_null() {
        let json = r#"[{"id": "BLOCK_000", "size_address": 2, "original_block_size": 3,
                        "original_text": "AB", "translated_text": null}]"#;
        let blocks = parse_blocks(json).unwrap();
        assert_eq!(blocks[0].translated_text, None);
        assert_eq!(blocks[0].effective_text(), "AB");
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(parse_blocks("{not json"), Err(Error::JsonError(_))));
        assert!(matches!(
            parse_blocks(r#"[{"id": "BLOCK_000"}]"#),
            Err(Error::JsonError(_))
        ));
    }

    #[test]
    fn test_write_and_read_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("script.json");

        let blocks = vec![
            Block::new(0, 2, 3, "AB").with_translation("Hello"),
            Block::new(1, 40, 0x120, "CD"),
        ];
        write_blocks(&path, &blocks).unwrap();
        assert_eq!(read_blocks(&path).unwrap(), blocks);
    }
}
