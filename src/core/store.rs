//! The save cache: an in-memory map from save path to [`CacheRecord`], backed by a
//! cache file on disk.
//!
//! # Lifecycle
//! One [`SaveCache`] is built per process and handed to whatever lists save files.
//! [`SaveCache::load`] fills it from disk once, [`SaveCache::get_info`] fills and
//! refreshes it as files are listed, and [`SaveCache::write`] persists it, usually
//! at shutdown. Mutating operations take `&mut self`; the cache has no internal
//! locking and callers sharing it across threads must wrap it themselves.
//!
//! # Failure policy
//! The cache only ever saves work. None of the public operations report errors:
//! an unreadable cache file loads as empty, an unreadable save file describes as an
//! empty string, and a failed write leaves the previous cache file in place. Each
//! degraded path is logged.

use crate::core::cache_file::{read_records, render_records, write_atomically};
use crate::core::describe::describe;
use crate::core::error::Result;
use crate::core::header::{HeaderReader, SaveFileHeaderReader, SaveHeader};
use crate::core::record::CacheRecord;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Pak id recorded for save files whose header could not be read
pub const UNKNOWN_PAK: &str = "(unknown)";

/// Suffix that marks a pak directory name, as in `pak64/`
pub const PAK_DIR_SUFFIX: char = '/';

/// Persistent cache of save-file metadata
#[derive(Debug)]
pub struct SaveCache<R = SaveFileHeaderReader> {
    cache_file: PathBuf,
    records: HashMap<String, CacheRecord>,
    reader: R,
}

impl SaveCache<SaveFileHeaderReader> {
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self::with_reader(cache_file, SaveFileHeaderReader)
    }
}

impl<R: HeaderReader> SaveCache<R> {
    /// Build a cache that reads save headers through `reader`
    pub fn with_reader(cache_file: impl Into<PathBuf>, reader: R) -> Self {
        Self {
            cache_file: cache_file.into(),
            records: HashMap::new(),
            reader,
        }
    }

    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Name the cache file is moved to while it is being read
    pub fn loading_path(&self) -> PathBuf {
        let mut name = self.cache_file.as_os_str().to_owned();
        name.push(".loading");
        PathBuf::from(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&CacheRecord> {
        self.records.get(path)
    }

    /// Insert or replace the record for `path`
    pub fn insert(&mut self, path: impl Into<String>, record: CacheRecord) {
        self.records.insert(path.into(), record);
    }

    pub fn records(&self) -> impl Iterator<Item = (&str, &CacheRecord)> {
        self.records.iter().map(|(path, record)| (path.as_str(), record))
    }

    /// Fill the cache from the cache file.
    ///
    /// Does nothing once the cache holds records. The file is renamed to
    /// [`loading_path`](Self::loading_path) for the duration of the read and renamed
    /// back afterwards, so a crash mid-read leaves no half-read file under the
    /// canonical name and the next run simply starts cold.
    pub fn load(&mut self) {
        if !self.records.is_empty() {
            return;
        }

        let loading = self.loading_path();
        if let Err(e) = fs::rename(&self.cache_file, &loading) {
            log::debug!(
                "No save cache at '{}', starting cold: {e}",
                self.cache_file.display()
            );
            return;
        }

        match File::open(&loading) {
            Ok(file) => {
                for (path, record) in read_records(BufReader::new(file)) {
                    self.records.insert(path, record);
                }
            }
            Err(e) => log::warn!("Could not open save cache '{}': {e}", loading.display()),
        }

        if let Err(e) = fs::rename(&loading, &self.cache_file) {
            log::warn!(
                "Could not restore save cache '{}': {e}",
                self.cache_file.display()
            );
        }

        log::debug!("Loaded {} cached save records", self.records.len());
    }

    /// Persist every record seen on disk during this run, logging on failure
    pub fn write(&self) {
        match self.try_write() {
            Ok(count) => log::debug!(
                "Wrote {count} save records to '{}'",
                self.cache_file.display()
            ),
            Err(e) => log::warn!("Save cache not written: {e}"),
        }
    }

    /// Persist every record with `exists` set, returning how many were written.
    ///
    /// Records loaded from disk but never confirmed by [`get_info`](Self::get_info)
    /// are left out, which is how entries for deleted saves age out of the file.
    pub fn try_write(&self) -> Result<usize> {
        let mut existing: Vec<(&str, &CacheRecord)> =
            self.records().filter(|(_, record)| record.exists).collect();
        existing.sort_by(|a, b| a.0.cmp(b.0));

        let body = render_records(existing.iter().copied())?;
        write_atomically(&self.cache_file, &body)?;
        Ok(existing.len())
    }

    /// Describe the save file at `path` for a file listing.
    ///
    /// This is a memoizing accessor, not a pure query: a cached record whose size
    /// and modification time still match the file is reused, otherwise the file's
    /// header is read and the record replaced. Returns an empty string, and caches
    /// nothing, when the file cannot be stat'd.
    pub fn get_info(&mut self, path: impl AsRef<Path>) -> String {
        let path = path.as_ref();
        let (file_size, mod_time) = match fingerprint(path) {
            Ok(fingerprint) => fingerprint,
            Err(e) => {
                log::debug!("Cannot stat '{}': {e}", path.display());
                return String::new();
            }
        };

        let key = path.to_string_lossy().into_owned();
        if let Some(record) = self.records.get_mut(&key) {
            if record.matches_fingerprint(file_size, mod_time) {
                log::debug!("Save cache hit for '{key}'");
                record.exists = true;
                return describe(record);
            }
        }

        log::debug!("Save cache miss for '{key}', reading header");
        let header = self.reader.read_header(path).unwrap_or_else(|e| {
            log::warn!("Could not read save header of '{key}': {e}");
            SaveHeader {
                pak: UNKNOWN_PAK.to_string(),
                ..SaveHeader::default()
            }
        });

        let mut record = CacheRecord::new(
            header.pak,
            mod_time,
            file_size,
            header.version,
            header.extended_version,
        );
        record.exists = true;
        let description = describe(&record);
        self.records.insert(key, record);
        description
    }

    /// Path of the newest cached save made with `active_pak`.
    ///
    /// `active_pak` is a pak directory name such as `pak64/`; a record matches when
    /// its pak id plus [`PAK_DIR_SUFFIX`] equals it. Only records already in memory
    /// are considered, so the caller lists the save directory first. Equal
    /// modification times resolve to the lexicographically smallest path.
    pub fn most_recent_compatible_save(&self, active_pak: &str) -> Option<&str> {
        self.most_recent_compatible_save_where(active_pak, |_, _| true)
    }

    /// Like [`most_recent_compatible_save`](Self::most_recent_compatible_save), but
    /// only among records for which `keep` returns true.
    pub fn most_recent_compatible_save_where<F>(&self, active_pak: &str, keep: F) -> Option<&str>
    where
        F: Fn(&str, &CacheRecord) -> bool,
    {
        self.records()
            .filter(|(_, record)| matches_active_pak(&record.pak, active_pak))
            .filter(|(path, record)| keep(path, record))
            .max_by(|(path_a, a), (path_b, b)| {
                a.mod_time
                    .cmp(&b.mod_time)
                    .then_with(|| path_b.cmp(path_a))
            })
            .map(|(path, _)| path)
    }
}

/// True when `pak` names the pak directory `active_pak`
pub fn matches_active_pak(pak: &str, active_pak: &str) -> bool {
    active_pak.strip_suffix(PAK_DIR_SUFFIX) == Some(pak)
}

/// Size and modification time of a file, as stored in a [`CacheRecord`]
pub fn fingerprint(path: &Path) -> std::io::Result<(i32, i64)> {
    let metadata = fs::metadata(path)?;
    let file_size = i32::try_from(metadata.len()).unwrap_or(i32::MAX);
    let mod_time = unix_seconds(metadata.modified()?);
    Ok((file_size, mod_time))
}

fn unix_seconds(time: SystemTime) -> i64 {
    match time.duration_since(UNIX_EPOCH) {
        Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
        Err(before) => -i64::try_from(before.duration().as_secs()).unwrap_or(i64::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_with(records: &[(&str, &str, i64)]) -> SaveCache {
        let mut cache = SaveCache::new("unused.jsonl");
        for (path, pak, mod_time) in records {
            cache.insert(*path, CacheRecord::new(*pak, *mod_time, 100, 0, 0));
        }
        cache
    }

    #[test]
    fn test_most_recent_compatible_save() {
        let cache = store_with(&[("A", "x", 10), ("B", "x", 30), ("C", "y", 100)]);
        assert_eq!(cache.most_recent_compatible_save("x/"), Some("B"));
        assert_eq!(cache.most_recent_compatible_save("y/"), Some("C"));
    }

    #[test]
    fn test_most_recent_compatible_save_no_match() {
        let cache = store_with(&[("A", "x", 10)]);
        assert_eq!(cache.most_recent_compatible_save("z/"), None);
        assert_eq!(store_with(&[]).most_recent_compatible_save("x/"), None);
    }

    #[test]
    fn test_most_recent_compatible_save_requires_suffix() {
        let cache = store_with(&[("A", "x", 10)]);
        assert_eq!(cache.most_recent_compatible_save("x"), None);
    }

    #[test]
    fn test_most_recent_compatible_save_tie_prefers_smallest_path() {
        let cache = store_with(&[("b.sve", "x", 30), ("a.sve", "x", 30), ("c.sve", "x", 30)]);
        assert_eq!(cache.most_recent_compatible_save("x/"), Some("a.sve"));
    }

    #[test]
    fn test_most_recent_compatible_save_where_skips_filtered() {
        let mut cache = store_with(&[("A", "x", 10), ("B", "x", 30)]);
        let mut seen = CacheRecord::new("x", 10, 100, 0, 0);
        seen.exists = true;
        cache.insert("A", seen);

        assert_eq!(cache.most_recent_compatible_save("x/"), Some("B"));
        assert_eq!(
            cache.most_recent_compatible_save_where("x/", |_, record| record.exists),
            Some("A")
        );
        assert_eq!(
            cache.most_recent_compatible_save_where("x/", |path, _| path == "C"),
            None
        );
    }

    #[test]
    fn test_matches_active_pak() {
        assert!(matches_active_pak("pak64", "pak64/"));
        assert!(!matches_active_pak("pak64", "pak64"));
        assert!(!matches_active_pak("pak64", "pak128/"));
    }

    #[test]
    fn test_loading_path() {
        let cache = SaveCache::new("/tmp/cache/save_cache.jsonl");
        assert_eq!(
            cache.loading_path(),
            PathBuf::from("/tmp/cache/save_cache.jsonl.loading")
        );
    }

    #[test]
    fn test_get_info_missing_file() {
        let temp = tempdir().unwrap();
        let mut cache = SaveCache::new(temp.path().join("cache.jsonl"));
        assert_eq!(cache.get_info(temp.path().join("nonexistent.sve")), "");
        assert!(cache.is_empty());
    }

    #[test]
    fn test_get_info_unreadable_header_is_cached_as_unknown() {
        let temp = tempdir().unwrap();
        let save = temp.path().join("broken.sve");
        fs::write(&save, "no header here").unwrap();

        let mut cache = SaveCache::new(temp.path().join("cache.jsonl"));
        let description = cache.get_info(&save);

        assert!(description.starts_with("(unknown) - "));
        let record = cache.get(&save.to_string_lossy()).unwrap();
        assert_eq!(record.pak, UNKNOWN_PAK);
        assert!(record.exists);
    }

    #[test]
    fn test_load_without_cache_file_is_cold() {
        let temp = tempdir().unwrap();
        let mut cache = SaveCache::new(temp.path().join("cache.jsonl"));
        cache.load();
        assert!(cache.is_empty());
        assert!(!cache.loading_path().exists());
    }

    #[test]
    fn test_write_skips_unconfirmed_records() {
        let temp = tempdir().unwrap();
        let mut cache = SaveCache::new(temp.path().join("cache.jsonl"));
        let mut seen = CacheRecord::new("pak64", 1, 1, 0, 0);
        seen.exists = true;
        cache.insert("seen.sve", seen);
        cache.insert("gone.sve", CacheRecord::new("pak64", 2, 2, 0, 0));

        assert_eq!(cache.try_write().unwrap(), 1);
        let body = fs::read_to_string(cache.cache_file()).unwrap();
        assert!(body.contains("seen.sve"));
        assert!(!body.contains("gone.sve"));
    }

    #[test]
    fn test_unix_seconds_before_epoch() {
        let before = UNIX_EPOCH - std::time::Duration::from_secs(5);
        assert_eq!(unix_seconds(before), -5);
    }
}
