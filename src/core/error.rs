//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`SaveCacheError`] which covers every fallible step behind
//! the save cache: reading save-file headers, reading and writing the on-disk cache,
//! and loading configuration. It uses `thiserror` for ergonomic error definitions
//! and includes constructors for the common failure scenarios.
//!
//! # Public API
//! - [`SaveCacheError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, SaveCacheError>`
//!
//! # Error Categories
//! - **Save files**: Missing header tag, malformed version strings
//! - **Cache file**: Directory creation, serialization, write failures
//! - **Configuration**: Unreadable or unparsable config file
//! - **Queries**: No compatible save for the active pak

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for savecache
#[derive(Error, Debug)]
pub enum SaveCacheError {
    // Generic I/O and serialization errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Save file header errors
    #[error("No save header found in '{path}'")]
    HeaderNotFound { path: PathBuf },

    #[error("Invalid save version '{version}': {source}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },

    #[error("Save version '{version}' is out of range")]
    VersionOutOfRange { version: String },

    // Cache file errors
    #[error("Could not find cache directory")]
    CacheDirectoryNotFound,

    #[error("Failed to create cache directory '{path}': {source}")]
    CacheDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize cache data: {source}")]
    CacheSerializationFailed { source: serde_json::Error },

    #[error("Failed to write cache file '{path}': {source}")]
    CacheWriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    // Query errors
    #[error("No save game found for pak '{pak}'")]
    NoCompatibleSave { pak: String },

    #[error("Save directory does not exist: {path}")]
    SaveDirNotFound { path: PathBuf },

    #[error("Save file does not exist: {path}")]
    SaveNotFound { path: PathBuf },
}

/// Convenience type alias for Results using SaveCacheError
pub type Result<T> = std::result::Result<T, SaveCacheError>;

impl SaveCacheError {
    /// Create a header not found error
    pub fn header_not_found(path: impl Into<PathBuf>) -> Self {
        Self::HeaderNotFound { path: path.into() }
    }

    /// Create an invalid version error
    pub fn invalid_version(version: impl Into<String>, source: semver::Error) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            source,
        }
    }

    /// Create a version out of range error
    pub fn version_out_of_range(version: impl Into<String>) -> Self {
        Self::VersionOutOfRange {
            version: version.into(),
        }
    }

    /// Create a cache directory creation failed error
    pub fn cache_directory_creation_failed(
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::CacheDirectoryCreationFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a cache serialization failed error
    pub fn cache_serialization_failed(source: serde_json::Error) -> Self {
        Self::CacheSerializationFailed { source }
    }

    /// Create a cache write failed error
    pub fn cache_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CacheWriteFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a no compatible save error
    pub fn no_compatible_save(pak: impl Into<String>) -> Self {
        Self::NoCompatibleSave { pak: pak.into() }
    }

    /// Create a save directory not found error
    pub fn save_dir_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SaveDirNotFound { path: path.into() }
    }

    /// Create a save file not found error
    pub fn save_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SaveNotFound { path: path.into() }
    }
}
