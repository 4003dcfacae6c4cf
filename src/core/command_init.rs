//! Centralized initialization for savecache commands.
//!
//! Every command needs the same setup: resolve the configuration, apply the
//! per-invocation overrides from the command line, and build a loaded
//! [`SaveCache`]. [`CommandInit`] does that once and hands back a
//! [`CommandContext`].

use crate::core::{
    config::CacheConfig,
    error::Result,
    store::SaveCache,
};
use std::path::PathBuf;

/// Command-line overrides shared by all commands
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    pub config_file: Option<PathBuf>,
    pub cache_file: Option<PathBuf>,
    pub pak: Option<String>,
}

/// Everything a command needs to run
pub struct CommandContext {
    pub config: CacheConfig,
    pub cache: SaveCache,
}

impl CommandContext {
    /// Save directory to scan: the explicit argument or the configured one
    pub fn save_dir(&self, dir: Option<PathBuf>) -> PathBuf {
        dir.unwrap_or_else(|| self.config.save_dir.clone())
    }
}

pub struct CommandInit;

impl CommandInit {
    /// Resolve configuration and load the save cache
    pub fn initialize(options: CommandOptions) -> Result<CommandContext> {
        let mut config = match &options.config_file {
            Some(path) => CacheConfig::load_or_create_at(path)?,
            None => CacheConfig::load_or_create()?,
        };

        if let Some(pak) = &options.pak {
            config.set_active_pak(pak);
        }
        if let Some(cache_file) = options.cache_file {
            config.cache_file = Some(cache_file);
        }

        let cache_file = config.resolve_cache_file()?;
        log::debug!("Using save cache file: {}", cache_file.display());

        let mut cache = SaveCache::new(cache_file);
        cache.load();

        Ok(CommandContext { config, cache })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_initialize_applies_overrides() {
        let temp = tempdir().unwrap();
        let options = CommandOptions {
            config_file: Some(temp.path().join("config.json")),
            cache_file: Some(temp.path().join("cache.jsonl")),
            pak: Some("pak128".to_string()),
        };

        let context = CommandInit::initialize(options).unwrap();
        assert_eq!(context.config.active_pak, "pak128/");
        assert_eq!(context.cache.cache_file(), temp.path().join("cache.jsonl"));
        assert!(context.cache.is_empty());
    }

    #[test]
    fn test_save_dir_prefers_argument() {
        let temp = tempdir().unwrap();
        let options = CommandOptions {
            config_file: Some(temp.path().join("config.json")),
            cache_file: Some(temp.path().join("cache.jsonl")),
            pak: None,
        };
        let context = CommandInit::initialize(options).unwrap();

        assert_eq!(
            context.save_dir(Some(PathBuf::from("/saves"))),
            PathBuf::from("/saves")
        );
        assert_eq!(context.save_dir(None), context.config.save_dir);
    }
}
