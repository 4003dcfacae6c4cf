use crate::commands::list::describe_saves;
use crate::core::{
    command_init::CommandContext,
    error::{Result, SaveCacheError},
};
use std::path::{Path, PathBuf};

/// Print the newest save made with the active pak.
///
/// Only saves confirmed in `dir` during this run are candidates, so records the
/// cache file still holds for deleted or elsewhere-stored saves are skipped.
pub fn execute_resume(mut context: CommandContext, dir: Option<PathBuf>) -> Result<()> {
    let save_dir = context.save_dir(dir);
    describe_saves(&mut context.cache, &save_dir)?;
    context.cache.write();

    let active_pak = &context.config.active_pak;
    let newest = context
        .cache
        .most_recent_compatible_save_where(active_pak, |path, record| {
            record.exists && Path::new(path).starts_with(&save_dir)
        });

    match newest {
        Some(path) => {
            println!("{path}");
            Ok(())
        }
        None => Err(SaveCacheError::no_compatible_save(active_pak)),
    }
}
