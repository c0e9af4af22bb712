// ABOUTME: Restore command implementation - Import SQL dump files
// ABOUTME: Sources each .sql file into the schema named by its file name using the mysql client

use crate::config::Settings;
use crate::migration::{collect_dump_files, restore_file};
use crate::utils;
use anyhow::Result;
use std::path::Path;

/// Import a dump file, or every `*.sql` file of a directory
///
/// Files are imported one at a time in path order. A failing file stops the
/// run; files imported before it are not rolled back.
///
/// # Errors
///
/// - [`crate::error::ValidationError::PathNotFound`] if `path` does not exist
/// - `mysql` missing from the search path or exiting non-zero
pub async fn restore(settings: &Settings, path: &Path, recursive: bool) -> Result<()> {
    let files = collect_dump_files(path, recursive)?;
    if files.is_empty() {
        tracing::warn!("⚠ No .sql files found in {}", path.display());
        return Ok(());
    }

    utils::check_required_tools(&[settings.programs.load.as_str()])?;

    tracing::info!("Restoring {} file(s) into {}", files.len(), settings.descriptor);
    for file in &files {
        restore_file(&settings.programs.load, &settings.descriptor, file).await?;
    }

    tracing::info!("✓ Restore complete");
    Ok(())
}
