// ABOUTME: Wrapper for mysqldump to export a schema or a few of its tables
// ABOUTME: Builds the client argument list and names the resulting .sql artifact

use crate::migration::artifact_name;
use crate::mysql::ConnectionDescriptor;
use crate::process;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Extension of SQL dump artifacts
pub const SQL_EXTENSION: &str = "sql";

/// Arguments for one `mysqldump` run writing to `output`
///
/// Connection flags come first, then `schema` and any `tables` to restrict the dump to.
pub fn dump_args(
    descriptor: &ConnectionDescriptor,
    schema: &str,
    tables: &[String],
    output: &Path,
) -> Vec<String> {
    let mut args = descriptor.client_args();
    let at = args
        .iter()
        .position(|arg| arg.starts_with("--user="))
        .unwrap_or(args.len());
    args.insert(at, format!("--result-file={}", output.display()));

    args.push(schema.to_string());
    args.extend(tables.iter().cloned());
    args
}

/// Dump `schema` (or only `tables` of it) into `<directory>/<entity>.sql`
///
/// Returns the path of the written file.
pub async fn dump_sql(
    program: &str,
    descriptor: &ConnectionDescriptor,
    entity: &str,
    schema: &str,
    tables: &[String],
    directory: &Path,
) -> Result<PathBuf> {
    let output = directory.join(artifact_name(entity, SQL_EXTENSION));
    tracing::info!("Exporting: {}", entity);

    let args = dump_args(descriptor, schema, tables, &output);
    let result = process::run(program, &args)
        .with_context(|| format!("Failed to dump '{}' to {}", entity, output.display()))?;

    if !result.stderr.is_empty() {
        tracing::warn!("⚠ {}: {}", program, result.stderr);
    }

    tracing::debug!("✓ Wrote {}", output.display());
    Ok(output)
}
