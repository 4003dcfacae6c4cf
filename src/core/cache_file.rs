//! On-disk format of the save cache.
//!
//! The cache is a JSON Lines file: a header document, then one `save_game_info`
//! section per cached save, then a `save_game_info` section with an empty path
//! marking the end of the records. Anything after that sentinel is ignored, and a
//! line that fails to parse ends the read early.
//!
//! ```text
//! {"program_version":"0.1.0","format_revision":2,"comment":"Automatically generated file. Do not edit."}
//! {"save_game_info":{"path":"saves/a.sve","pak":"pak64","mod_time":1700000000,"file_size":5120,"version":120004,"extended_version":14}}
//! {"save_game_info":{"path":"","pak":"","mod_time":0,"file_size":0}}
//! ```
//!
//! Writing goes through a temporary file that is synced and then renamed over the
//! cache, so an interrupted write never leaves a truncated cache behind.

use crate::core::error::{Result, SaveCacheError};
use crate::core::record::CacheRecord;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Revision written into new cache files
pub const CACHE_FORMAT_REVISION: u32 = 2;

/// First revision whose records carry the two version fields
pub const VERSIONED_RECORDS_REVISION: u32 = 2;

pub const CACHE_COMMENT: &str = "Automatically generated file. Do not edit.";

/// First line of every cache file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheFileHeader {
    pub program_version: String,
    pub format_revision: u32,
    #[serde(default)]
    pub comment: String,
}

impl CacheFileHeader {
    pub fn current() -> Self {
        Self {
            program_version: env!("CARGO_PKG_VERSION").to_string(),
            format_revision: CACHE_FORMAT_REVISION,
            comment: CACHE_COMMENT.to_string(),
        }
    }
}

/// Tagged sections that may follow the header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheSection {
    SaveGameInfo(SaveGameInfo),
}

/// A cached record as stored on disk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGameInfo {
    pub path: String,
    #[serde(default)]
    pub pak: String,
    #[serde(default)]
    pub mod_time: i64,
    #[serde(default)]
    pub file_size: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_version: Option<u32>,
}

impl SaveGameInfo {
    fn from_record(path: &str, record: &CacheRecord) -> Self {
        Self {
            path: path.to_string(),
            pak: record.pak.clone(),
            mod_time: record.mod_time,
            file_size: record.file_size,
            version: Some(record.version),
            extended_version: Some(record.extended_version),
        }
    }

    fn end_of_records() -> Self {
        Self::default()
    }

    fn into_record(self, format_revision: u32) -> (String, CacheRecord) {
        let (version, extended_version) = if format_revision >= VERSIONED_RECORDS_REVISION {
            (
                self.version.unwrap_or(0),
                self.extended_version.unwrap_or(0),
            )
        } else {
            (0, 0)
        };
        let record = CacheRecord::new(
            self.pak,
            self.mod_time,
            self.file_size,
            version,
            extended_version,
        );
        (self.path, record)
    }
}

/// Path of the temporary file a write goes through
pub fn temp_path(cache_file: &Path) -> PathBuf {
    let mut name = cache_file.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Read cached records from an open cache file.
///
/// Never fails: an unreadable header yields no records, and an unreadable record
/// ends the read with whatever was collected so far.
pub fn read_records<R: BufRead>(reader: R) -> Vec<(String, CacheRecord)> {
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(Ok(line)) => match serde_json::from_str::<CacheFileHeader>(&line) {
            Ok(header) => header,
            Err(e) => {
                log::warn!("Ignoring save cache with unreadable header: {e}");
                return Vec::new();
            }
        },
        _ => return Vec::new(),
    };
    log::debug!(
        "Reading save cache written by version {} (revision {})",
        header.program_version,
        header.format_revision
    );

    let mut records = Vec::new();
    for line in lines {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Save cache read stopped early: {e}");
                break;
            }
        };
        let CacheSection::SaveGameInfo(info) = match serde_json::from_str::<CacheSection>(&line) {
            Ok(section) => section,
            Err(e) => {
                log::warn!("Save cache read stopped at corrupt record: {e}");
                break;
            }
        };
        if info.path.is_empty() {
            break;
        }
        records.push(info.into_record(header.format_revision));
    }

    records
}

/// Serialize records into the cache file body, sentinel included
pub fn render_records<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = (&'a str, &'a CacheRecord)>,
{
    let mut body = serde_json::to_string(&CacheFileHeader::current())
        .map_err(SaveCacheError::cache_serialization_failed)?;
    body.push('\n');

    let sections = records
        .into_iter()
        .map(|(path, record)| SaveGameInfo::from_record(path, record))
        .chain(std::iter::once(SaveGameInfo::end_of_records()));

    for info in sections {
        let line = serde_json::to_string(&CacheSection::SaveGameInfo(info))
            .map_err(SaveCacheError::cache_serialization_failed)?;
        body.push_str(&line);
        body.push('\n');
    }

    Ok(body)
}

/// Replace the cache file with `body` using the write-rename pattern
pub fn write_atomically(cache_file: &Path, body: &str) -> Result<()> {
    if let Some(parent) = cache_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| SaveCacheError::cache_directory_creation_failed(parent, e))?;
        }
    }

    let tmp = temp_path(cache_file);
    let write_tmp = || -> std::io::Result<()> {
        let mut file = File::create(&tmp)?;
        file.write_all(body.as_bytes())?;
        file.sync_all()
    };
    write_tmp().map_err(|e| SaveCacheError::cache_write_failed(&tmp, e))?;

    fs::rename(&tmp, cache_file).map_err(|e| SaveCacheError::cache_write_failed(cache_file, e))
}
