use crate::core::{
    command_init::CommandContext,
    error::{Result, SaveCacheError},
    output::{print_save_entry, print_section_header},
    store::SaveCache,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Extension of save game files
pub const SAVE_EXTENSION: &str = "sve";

pub fn execute_list(mut context: CommandContext, dir: Option<PathBuf>) -> Result<()> {
    let save_dir = context.save_dir(dir);
    let entries = describe_saves(&mut context.cache, &save_dir)?;

    print_section_header(&format!("Saved games in {}", save_dir.display()));
    if entries.is_empty() {
        println!("  (none)");
    }
    for (index, (path, description)) in entries.iter().enumerate() {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        print_save_entry(index + 1, &name, description);
    }
    println!();

    context.cache.write();
    Ok(())
}

/// Describe every save file in `save_dir`, newest first.
///
/// Each file goes through [`SaveCache::get_info`], so afterwards the cache holds a
/// fresh record for everything listed.
pub fn describe_saves(cache: &mut SaveCache, save_dir: &Path) -> Result<Vec<(PathBuf, String)>> {
    let saves = list_save_files(save_dir)?;
    log::debug!("Found {} save files in {}", saves.len(), save_dir.display());

    Ok(saves
        .into_iter()
        .map(|path| {
            let description = cache.get_info(&path);
            (path, description)
        })
        .filter(|(_, description)| !description.is_empty())
        .collect())
}

/// Save files directly inside `save_dir`, most recently modified first
pub fn list_save_files(save_dir: &Path) -> Result<Vec<PathBuf>> {
    if !save_dir.is_dir() {
        return Err(SaveCacheError::save_dir_not_found(save_dir));
    }

    let mut saves: Vec<(SystemTime, PathBuf)> = fs::read_dir(save_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_save_extension(path))
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|metadata| metadata.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .collect();

    saves.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    Ok(saves.into_iter().map(|(_, path)| path).collect())
}

fn has_save_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case(SAVE_EXTENSION))
        .unwrap_or(false)
}
