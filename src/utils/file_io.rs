use std::fs::File;
use std::fs::OpenOptions;
use std::path::Path;

use crate::Result;

/// Creates the parent directory of `path` if missing.
pub fn create_parent_dir_if_not_exist(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn open_file_for_append(path: &Path) -> Result<File> {
    create_parent_dir_if_not_exist(path)?;
    let log_file = OpenOptions::new().append(true).create(true).open(path)?;
    Ok(log_file)
}
