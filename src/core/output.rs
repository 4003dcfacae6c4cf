//! Output formatting for the savecache CLI.
//!
//! Keeps error lines, section headers and file-listing rows looking the same across
//! commands: red for errors, white for content, bright black for secondary detail.

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}

/// Prints one row of a save listing: index, file name, description
///
/// # Format
/// ```text
///   [1] autosave.sve  pak64 (v 120.4, e 14) - 2024-01-31 18:05
/// ```
pub fn print_save_entry(index: usize, name: &str, description: &str) {
    println!(
        "  {} {}  {}",
        format!("[{index}]").bright_black(),
        name.white(),
        description.bright_black()
    );
}
