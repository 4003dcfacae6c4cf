//! Save-file header reading.
//!
//! On a cache miss the store reads the save file's own header to learn which pak set
//! it was made with and which save-format versions it uses. The header is a tag in
//! the text preamble of the file:
//!
//! ```text
//! <?xml version="1.0"?>
//! <Simutrans version="0.120.4" pak="pak64" extended="14">
//! ```
//!
//! Reading goes through the [`HeaderReader`] trait so the store can be driven by an
//! instrumented reader in tests.

use crate::core::error::{Result, SaveCacheError};
use semver::Version;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Only this many leading bytes of a save file are searched for the header tag
pub const HEADER_SCAN_LIMIT: u64 = 4096;

const HEADER_TAG: &str = "<Simutrans";

/// Identity of a save file as recorded in its header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveHeader {
    pub pak: String,
    pub version: u32,
    pub extended_version: u32,
}

/// Reads the header of a save file on disk
pub trait HeaderReader {
    fn read_header(&self, path: &Path) -> Result<SaveHeader>;
}

/// Reads headers straight from save files
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveFileHeaderReader;

impl HeaderReader for SaveFileHeaderReader {
    fn read_header(&self, path: &Path) -> Result<SaveHeader> {
        let mut buffer = Vec::new();
        File::open(path)?
            .take(HEADER_SCAN_LIMIT)
            .read_to_end(&mut buffer)?;

        let preamble = String::from_utf8_lossy(&buffer);
        parse_header(&preamble).ok_or_else(|| SaveCacheError::header_not_found(path))?
    }
}

/// Parse the header tag out of a save-file preamble.
///
/// Returns `None` when no complete tag is present, and `Some(Err(_))` when the tag
/// carries a version that is not `MAJOR.MINOR.PATCH`.
pub fn parse_header(preamble: &str) -> Option<Result<SaveHeader>> {
    let start = preamble.find(HEADER_TAG)? + HEADER_TAG.len();
    let end = preamble[start..].find('>')? + start;
    let tag = &preamble[start..end];

    let pak = attribute(tag, "pak").unwrap_or_default().to_string();
    let version = match attribute(tag, "version") {
        Some(raw) => match pack_version(raw) {
            Ok(version) => version,
            Err(e) => return Some(Err(e)),
        },
        None => 0,
    };
    let extended_version = attribute(tag, "extended")
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(0);

    Some(Ok(SaveHeader {
        pak,
        version,
        extended_version,
    }))
}

/// Pack a dotted save version into a single integer: `0.120.4` becomes `120004`.
///
/// Versions whose packed form does not fit a `u32` are rejected.
pub fn pack_version(raw: &str) -> Result<u32> {
    let version =
        Version::parse(raw.trim()).map_err(|e| SaveCacheError::invalid_version(raw, e))?;
    version
        .major
        .checked_mul(1_000_000)
        .and_then(|packed| packed.checked_add(version.minor.checked_mul(1_000)?))
        .and_then(|packed| packed.checked_add(version.patch))
        .and_then(|packed| u32::try_from(packed).ok())
        .ok_or_else(|| SaveCacheError::version_out_of_range(raw))
}

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let start = tag.find(&needle)? + needle.len();
    let len = tag[start..].find('"')?;
    Some(&tag[start..start + len])
}
