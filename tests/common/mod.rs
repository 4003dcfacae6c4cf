//! Shared test utilities for savecache integration tests
//!
//! Provides save-file fixtures with controlled headers and modification times,
//! an instrumented header reader, and output predicates for CLI tests.

pub mod assertions;
pub mod fixtures;
