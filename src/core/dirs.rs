use crate::core::error::SaveCacheError;
use std::path::PathBuf;

const APP_DIR: &str = "savecache";

/// File name of the save cache inside the cache directory
pub const CACHE_FILE_NAME: &str = "save_cache.jsonl";

pub fn get_config_directory() -> Result<PathBuf, SaveCacheError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| home_dir().map(|home| home.join(".config")))?,
        "macos" => home_dir()?.join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(SaveCacheError::CacheDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

pub fn get_cache_directory() -> Result<PathBuf, SaveCacheError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CACHE_HOME")
            .map(PathBuf::from)
            .or_else(|_| home_dir().map(|home| home.join(".cache")))?,
        "macos" => home_dir()?.join("Library/Caches"),
        _ => dirs::cache_dir().ok_or(SaveCacheError::CacheDirectoryNotFound)?,
    };

    Ok(base.join(APP_DIR))
}

/// Default location of the save cache file
pub fn default_cache_file() -> Result<PathBuf, SaveCacheError> {
    Ok(get_cache_directory()?.join(CACHE_FILE_NAME))
}

/// Default directory the game writes save files into
pub fn default_save_directory() -> PathBuf {
    dirs::data_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("simutrans")
        .join("save")
}

fn home_dir() -> Result<PathBuf, SaveCacheError> {
    dirs::home_dir().ok_or(SaveCacheError::CacheDirectoryNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_file_lives_in_app_directory() {
        if let Ok(file) = default_cache_file() {
            assert!(file.ends_with("savecache/save_cache.jsonl"));
        }
    }

    #[test]
    fn test_default_save_directory() {
        assert!(default_save_directory().ends_with("simutrans/save"));
    }
}
