//! Save-file fixtures
//!
//! Save files are written with a real header tag and an explicit modification
//! time so fingerprints are predictable across test runs.

#![allow(dead_code)]

use savecache::core::error::Result as CacheResult;
use savecache::{HeaderReader, SaveFileHeaderReader, SaveHeader};
use std::cell::Cell;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Header tag as the game writes it at the top of a save
pub fn header_text(pak: &str, version: &str, extended: Option<u32>) -> String {
    let extended = extended
        .map(|e| format!(" extended=\"{e}\""))
        .unwrap_or_default();
    format!("<?xml version=\"1.0\"?>\n<Simutrans version=\"{version}\" pak=\"{pak}\"{extended}>\n")
}

/// Write a save file with the given header, padded with `body`, and set its mtime
pub fn write_save(
    dir: &Path,
    name: &str,
    pak: &str,
    extended: Option<u32>,
    body: &str,
    mod_time: u64,
) -> anyhow::Result<PathBuf> {
    let path = dir.join(name);
    let mut content = header_text(pak, "0.120.4", extended);
    content.push_str(body);
    fs::write(&path, content)?;
    set_mod_time(&path, mod_time)?;
    Ok(path)
}

pub fn set_mod_time(path: &Path, mod_time: u64) -> anyhow::Result<()> {
    File::options()
        .write(true)
        .open(path)?
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(mod_time))?;
    Ok(())
}

/// Scratch directory holding a `saves/` folder and a cache file path
pub struct Workspace {
    pub temp_dir: TempDir,
    pub saves: PathBuf,
    pub cache_file: PathBuf,
    pub config_file: PathBuf,
}

impl Workspace {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = TempDir::new()?;
        let saves = temp_dir.path().join("saves");
        fs::create_dir_all(&saves)?;
        let cache_file = temp_dir.path().join("cache").join("save_cache.jsonl");
        let config_file = temp_dir.path().join("config").join("config.json");
        Ok(Self {
            temp_dir,
            saves,
            cache_file,
            config_file,
        })
    }
}

/// Header reader that counts how often a save file is actually opened
#[derive(Debug, Clone, Default)]
pub struct CountingReader {
    opens: Rc<Cell<usize>>,
}

impl CountingReader {
    pub fn opens(&self) -> usize {
        self.opens.get()
    }
}

impl HeaderReader for CountingReader {
    fn read_header(&self, path: &Path) -> CacheResult<SaveHeader> {
        self.opens.set(self.opens.get() + 1);
        SaveFileHeaderReader.read_header(path)
    }
}
