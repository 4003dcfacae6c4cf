use crate::core::dirs::{default_cache_file, default_save_directory, get_config_directory};
use crate::core::error::SaveCacheError;
use crate::core::store::PAK_DIR_SUFFIX;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_PAK: &str = "pak64/";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Pak directory the game currently runs with, e.g. `pak64/`
    pub active_pak: String,
    /// Directory scanned for save files
    pub save_dir: PathBuf,
    /// Overrides the default cache file location
    #[serde(default)]
    pub cache_file: Option<PathBuf>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            active_pak: DEFAULT_PAK.to_string(),
            save_dir: default_save_directory(),
            cache_file: None,
            created_at: chrono::Utc::now(),
        }
    }
}

impl CacheConfig {
    pub fn load_or_create() -> Result<Self, SaveCacheError> {
        let config_file = get_config_directory()?.join(CONFIG_FILE_NAME);
        Self::load_or_create_at(&config_file)
    }

    pub fn load_or_create_at(config_file: &Path) -> Result<Self, SaveCacheError> {
        if config_file.exists() {
            let content = std::fs::read_to_string(config_file)
                .map_err(|e| SaveCacheError::config_read_failed(config_file, e))?;
            let mut config: Self = serde_json::from_str(&content)
                .map_err(|e| SaveCacheError::config_parse_failed(config_file, e))?;
            config.active_pak = normalize_pak_dir(&config.active_pak);
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_file)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_file: &Path) -> Result<(), SaveCacheError> {
        if let Some(dir) = config_file.parent() {
            std::fs::create_dir_all(dir)
                .map_err(|e| SaveCacheError::cache_directory_creation_failed(dir, e))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_file, content)?;

        Ok(())
    }

    /// Cache file to use: the configured override or the platform default
    pub fn resolve_cache_file(&self) -> Result<PathBuf, SaveCacheError> {
        match &self.cache_file {
            Some(path) => Ok(path.clone()),
            None => default_cache_file(),
        }
    }

    pub fn set_active_pak(&mut self, pak: &str) {
        self.active_pak = normalize_pak_dir(pak);
    }
}

/// Ensure a pak name carries the directory suffix: `pak64` becomes `pak64/`
pub fn normalize_pak_dir(pak: &str) -> String {
    if pak.ends_with(PAK_DIR_SUFFIX) {
        pak.to_string()
    } else {
        format!("{pak}{PAK_DIR_SUFFIX}")
    }
}
