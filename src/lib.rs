//! Savecache - a persistent metadata cache for game save files.
//!
//! Listing a directory of save games should not mean opening every save to find out
//! which pak set it needs. This library keeps a small cache file mapping each save
//! path to its pak id, save-format versions and a (size, modification time)
//! fingerprint, refreshes entries whose fingerprint changed, and answers "which is
//! the newest save for the pak I am running".
//!
//! # Public API
//! The main interface is re-exported from the [`core`] module:
//! - [`SaveCache`]: load, write, describe and query cached saves
//! - [`CacheRecord`]: metadata cached per save file
//! - [`HeaderReader`]: how cache misses read a save file's header
//! - [`SaveCacheError`] and [`Result`]: error handling

pub mod commands;
pub mod core;

pub use crate::core::{
    describe, CacheConfig, CacheRecord, HeaderReader, Result, SaveCache, SaveCacheError,
    SaveFileHeaderReader, SaveHeader, DESCRIPTION_CAPACITY, UNKNOWN_DATE, UNKNOWN_PAK,
};
