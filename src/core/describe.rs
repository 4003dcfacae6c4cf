//! Formatting of the one-line save description shown in file listings.

use crate::core::record::CacheRecord;
use chrono::{Local, TimeZone};

/// Upper bound, in bytes, of a rendered description
pub const DESCRIPTION_CAPACITY: usize = 1023;

/// Shown instead of the date when the timestamp cannot be represented
pub const UNKNOWN_DATE: &str = "??.??.???? ??:??";

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Render `"<pak> (v 120.4, e 14) - 2024-01-31 18:05"`, dropping the version
/// part unless both versions are known.
pub fn describe(record: &CacheRecord) -> String {
    let mut description = if record.has_versions() {
        format!(
            "{} (v {}.{}, e {}) - ",
            record.pak,
            record.version / 1000,
            record.version % 1000,
            record.extended_version
        )
    } else {
        format!("{} - ", record.pak)
    };
    description.push_str(&format_mod_time(record.mod_time));

    truncate_to_boundary(description, DESCRIPTION_CAPACITY)
}

/// Local-time rendering of a Unix timestamp in seconds
pub fn format_mod_time(mod_time: i64) -> String {
    match Local.timestamp_opt(mod_time, 0).single() {
        Some(time) => time.format(DATE_FORMAT).to_string(),
        None => UNKNOWN_DATE.to_string(),
    }
}

fn truncate_to_boundary(mut s: String, max_bytes: usize) -> String {
    if s.len() > max_bytes {
        let mut end = max_bytes;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        s.truncate(end);
    }
    s
}
