use crate::core::{
    command_init::CommandContext,
    error::{Result, SaveCacheError},
};
use std::path::PathBuf;

pub fn execute_info(mut context: CommandContext, file: PathBuf) -> Result<()> {
    let description = context.cache.get_info(&file);
    if description.is_empty() {
        return Err(SaveCacheError::save_not_found(file));
    }

    println!("{description}");
    context.cache.write();
    Ok(())
}
