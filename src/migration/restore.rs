// ABOUTME: Wrapper for the mysql client to import SQL dump files
// ABOUTME: Finds .sql files and sources each one into the schema named by its file name

use crate::error::ValidationError;
use crate::mysql::catalog::quote_identifier;
use crate::mysql::ConnectionDescriptor;
use crate::process;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Dump files to import from `path`, sorted by path
///
/// A file is returned as-is whatever its extension. A directory yields its
/// `*.sql` files, descending into subdirectories only when `recursive` is set.
///
/// # Errors
///
/// [`ValidationError::PathNotFound`] if `path` does not exist.
pub fn collect_dump_files(path: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(ValidationError::PathNotFound(path.to_path_buf()).into());
    }

    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut files = Vec::new();
    for entry in WalkDir::new(path).min_depth(1).max_depth(max_depth) {
        let entry =
            entry.with_context(|| format!("Failed to read directory {}", path.display()))?;
        let is_sql = entry
            .path()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("sql"));

        if entry.file_type().is_file() && is_sql {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

/// Target schema of a dump file: its file name up to the first `.`
///
/// ```
/// # use std::path::Path;
/// # use mysql_admin_tools::migration::restore::schema_of;
/// assert_eq!(schema_of(Path::new("/backups/shop.orders.sql")).unwrap(), "shop");
/// assert_eq!(schema_of(Path::new("shop.sql")).unwrap(), "shop");
/// ```
pub fn schema_of(file: &Path) -> Result<String, ValidationError> {
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_name.split('.').next() {
        Some(schema) if !schema.is_empty() => Ok(schema.to_string()),
        _ => Err(ValidationError::InvalidIdentifier {
            kind: "schema",
            value: file_name,
        }),
    }
}

/// Arguments for a `mysql` run that sources `file` into `schema`
pub fn load_args(descriptor: &ConnectionDescriptor, schema: &str, file: &Path) -> Vec<String> {
    let source = file.to_string_lossy().replace('\\', "/");
    let mut args = descriptor.client_args();
    args.insert(
        1,
        format!(
            "--execute=USE {}; SOURCE {};",
            quote_identifier(schema),
            source
        ),
    );
    args
}

/// Import one dump file
///
/// A failure leaves whatever statements already ran in place.
pub async fn restore_file(
    program: &str,
    descriptor: &ConnectionDescriptor,
    file: &Path,
) -> Result<()> {
    let schema = schema_of(file)?;
    tracing::info!("Importing: {}", file.display());

    let args = load_args(descriptor, &schema, file);
    let output = process::run(program, &args).with_context(|| {
        format!(
            "Failed to import {} into schema '{}'",
            file.display(),
            schema
        )
    })?;

    if !output.stderr.is_empty() {
        tracing::warn!("⚠ {}: {}", program, output.stderr);
    }

    Ok(())
}
