// ABOUTME: Bulk DDL across a selection of tables: charset, engine and optimize
// ABOUTME: Conversions skip tables already on the target and run with foreign-key checks off

pub mod guard;

pub use guard::ForeignKeyChecks;

use crate::filters::Selection;
use crate::mysql::catalog::charset_of;
use crate::mysql::{Quoting, Session, Table};
use crate::utils::validate_identifier;
use anyhow::Result;

/// Tables touched by a bulk operation, as bare qualified names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceReport {
    /// Tables a statement was issued for, in processing order
    pub visited: Vec<String>,
    /// Tables left alone because they were already on the target value
    pub skipped: Vec<String>,
}

/// Convert every selected table to `collation` and its character set
///
/// Tables whose collation already matches (ignoring ASCII case) are skipped,
/// so a second run with the same collation issues no statements.
///
/// # Errors
///
/// Fails with [`crate::error::ValidationError::InvalidIdentifier`] before any
/// statement if `collation` is not a plain identifier. An `ALTER TABLE`
/// failure stops the loop; tables already converted stay converted.
pub async fn convert_charset<S: Session>(
    session: &mut S,
    selection: &Selection,
    collation: &str,
) -> Result<MaintenanceReport> {
    validate_identifier("collation", collation)?;
    let charset = charset_of(collation);

    let tables = selection.resolve(session).await?;
    let mut guard = ForeignKeyChecks::suspend(session).await?;
    let outcome = alter_each(
        guard.session(),
        &tables,
        |table| table.collation.eq_ignore_ascii_case(collation),
        |name| {
            format!(
                "ALTER TABLE {} CONVERT TO CHARACTER SET {} COLLATE {}",
                name, charset, collation
            )
        },
    )
    .await;
    guard.restore(outcome).await
}

/// Move every selected table to storage `engine`
///
/// Tables already on `engine` (ignoring ASCII case) are skipped.
pub async fn convert_engine<S: Session>(
    session: &mut S,
    selection: &Selection,
    engine: &str,
) -> Result<MaintenanceReport> {
    validate_identifier("engine", engine)?;

    let tables = selection.resolve(session).await?;
    let mut guard = ForeignKeyChecks::suspend(session).await?;
    let outcome = alter_each(
        guard.session(),
        &tables,
        |table| table.engine.eq_ignore_ascii_case(engine),
        |name| format!("ALTER TABLE {} ENGINE = {}", name, engine),
    )
    .await;
    guard.restore(outcome).await
}

/// Run `OPTIMIZE TABLE` on every selected table, every time
pub async fn optimize_tables<S: Session>(
    session: &mut S,
    selection: &Selection,
) -> Result<MaintenanceReport> {
    let tables = selection.resolve(session).await?;
    let mut report = MaintenanceReport::default();

    for table in &tables {
        let name = table.qualified_name(Quoting::Backtick);
        tracing::info!("Optimizing: {}", name);
        session.execute(&format!("OPTIMIZE TABLE {}", name)).await?;
        report.visited.push(table.qualified_name(Quoting::Bare));
    }

    Ok(report)
}

async fn alter_each<S, F, G>(
    session: &mut S,
    tables: &[Table],
    already_converted: F,
    statement: G,
) -> Result<MaintenanceReport>
where
    S: Session,
    F: Fn(&Table) -> bool,
    G: Fn(&str) -> String,
{
    let mut report = MaintenanceReport::default();

    for table in tables {
        if already_converted(table) {
            tracing::debug!("Skipping {}: already converted", table.qualified_name(Quoting::Bare));
            report.skipped.push(table.qualified_name(Quoting::Bare));
            continue;
        }

        let name = table.qualified_name(Quoting::Backtick);
        tracing::info!("Processing: {}", name);
        session.execute(&statement(&name)).await?;
        report.visited.push(table.qualified_name(Quoting::Bare));
    }

    Ok(report)
}
