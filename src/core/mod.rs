//! Core functionality for the savecache tool.
//!
//! This module provides the save cache itself, the on-disk format it persists to,
//! save-file header reading, and the configuration and output helpers used by the
//! command-line front end.

pub mod cache_file;
pub mod command_init;
pub mod config;
pub mod describe;
pub mod dirs;
pub mod error;
pub mod header;
pub mod output;
pub mod record;
pub mod store;

// === Error handling ===
pub use error::{Result, SaveCacheError};

// === Cache ===
// In-memory map of save metadata with load/write against the cache file
pub use record::CacheRecord;
pub use store::{SaveCache, UNKNOWN_PAK};

// === Save headers ===
pub use header::{HeaderReader, SaveFileHeaderReader, SaveHeader};

// === Listing descriptions ===
pub use describe::{describe, DESCRIPTION_CAPACITY, UNKNOWN_DATE};

// === Configuration ===
pub use config::CacheConfig;

// === Command initialization ===
pub use command_init::{CommandContext, CommandInit, CommandOptions};

// === Output formatting ===
pub use output::{print_error, print_save_entry, print_section_header};
