// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use std::path::Path;

/// The output must be an absolute path; an existing file is only replaced
/// with `force`.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.is_absolute() {
        return Err(AppError::Export(format!(
            "output file path must be absolute: {}",
            path.display()
        )));
    }

    if path.exists() && !force {
        return Err(AppError::Export(format!(
            "'{}' already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Ok(())
}
