//! Cached metadata for a single save file.
//!
//! A [`CacheRecord`] holds what a file picker needs to describe a save without
//! opening it: the pak the game was saved with, the save-format versions, and the
//! (size, modification time) fingerprint used to detect that the file changed.
//!
//! # Equality
//! Two records are equal when `mod_time`, `file_size` and `pak` match. The version
//! fields are derived from the file header and the `exists` flag is per-run state,
//! so neither takes part in the comparison.

/// Metadata cached for one save file
#[derive(Debug, Clone, Default)]
pub struct CacheRecord {
    /// Pak set the save was created with
    pub pak: String,
    /// Modification time in seconds since the Unix epoch
    pub mod_time: i64,
    /// File length in bytes at cache time
    pub file_size: i32,
    /// Core save-format version, 0 when unknown
    pub version: u32,
    /// Extended save-format version, 0 when unknown
    pub extended_version: u32,
    /// Whether the file was seen on disk during this run
    pub exists: bool,
}

impl CacheRecord {
    pub fn new(
        pak: impl Into<String>,
        mod_time: i64,
        file_size: i32,
        version: u32,
        extended_version: u32,
    ) -> Self {
        Self {
            pak: pak.into(),
            mod_time,
            file_size,
            version,
            extended_version,
            exists: false,
        }
    }

    /// True when the record still describes a file with this size and mtime
    pub fn matches_fingerprint(&self, file_size: i32, mod_time: i64) -> bool {
        self.file_size == file_size && self.mod_time == mod_time
    }

    /// True when both version fields are known
    pub fn has_versions(&self) -> bool {
        self.version != 0 && self.extended_version != 0
    }
}

impl PartialEq for CacheRecord {
    fn eq(&self, other: &Self) -> bool {
        self.mod_time == other.mod_time
            && self.file_size == other.file_size
            && self.pak == other.pak
    }
}

impl Eq for CacheRecord {}
