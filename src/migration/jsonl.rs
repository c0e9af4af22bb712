// ABOUTME: JSON Lines export of table rows over the live session
// ABOUTME: Streams one JSON object per row into <schema>.<table>.jsonl

use crate::migration::artifact_name;
use crate::mysql::{Column, Quoting, Record, Session, Table};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Extension of JSON Lines artifacts
pub const JSONL_EXTENSION: &str = "jsonl";

/// Outcome of exporting one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableExport {
    pub path: PathBuf,
    pub rows: u64,
    /// Catalog columns absent from the exported records
    pub missing_columns: Vec<String>,
}

/// Export every row of `table` into `<directory>/<schema>.<table>.jsonl`
///
/// Rows are written as they arrive, one object per line with keys in column
/// order. `SELECT *` does not project invisible columns; any catalog column
/// missing from the first exported row is reported as a warning. Empty tables
/// skip that check.
pub async fn export_table<S: Session>(
    session: &mut S,
    table: &Table,
    directory: &Path,
) -> Result<TableExport> {
    let bare_name = table.qualified_name(Quoting::Bare);
    let path = directory.join(artifact_name(&bare_name, JSONL_EXTENSION));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let mut exported_columns: Option<Vec<String>> = None;
    let mut sink = |record: Record| -> Result<()> {
        if exported_columns.is_none() {
            exported_columns = Some(record.keys().cloned().collect());
        }
        serde_json::to_writer(&mut writer, &record)?;
        writer.write_all(b"\n")?;
        Ok(())
    };

    let sql = format!("SELECT * FROM {}", table.qualified_name(Quoting::Backtick));
    let rows = session
        .for_each_record(&sql, &mut sink)
        .await
        .with_context(|| format!("Failed to export table '{}'", bare_name))?;

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("✓ Wrote {} row(s) to {}", rows, path.display());

    let mut missing = Vec::new();
    if let Some(exported) = exported_columns {
        let columns = session.list_columns(table).await?;
        missing = missing_columns(&columns, &exported);
        if !missing.is_empty() {
            tracing::warn!(
                "⚠ {}: column(s) not exported (invisible columns are not selected): {}",
                bare_name,
                missing.join(", ")
            );
        }
    }

    Ok(TableExport {
        path,
        rows,
        missing_columns: missing,
    })
}

/// Names of catalog `columns` that do not appear among the `exported` keys, in catalog order
pub fn missing_columns(columns: &[Column], exported: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|column| !exported.iter().any(|key| *key == column.name))
        .map(|column| column.name.clone())
        .collect()
}
