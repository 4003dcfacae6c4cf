//! Common assertion helpers for CLI output validation

#![allow(dead_code)]

use predicates::prelude::*;

/// Description of a save with both versions known
pub fn versioned_description(pak: &str, extended: u32) -> impl Predicate<str> {
    predicates::str::contains(format!("{pak} (v 120.4, e {extended}) - "))
}

/// Description of a save without an extended version
pub fn plain_description(pak: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{pak} - "))
}

/// Error line printed by the binary
pub fn error_line(message: &str) -> impl Predicate<str> {
    predicates::str::contains("Error:").and(predicates::str::contains(message.to_string()))
}
