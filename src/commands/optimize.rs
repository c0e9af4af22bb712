// ABOUTME: Optimize command implementation - Rebuild tables and their indexes
// ABOUTME: Issues OPTIMIZE TABLE for every selected table on every run

use crate::config::Settings;
use crate::filters::Selection;
use crate::maintenance::optimize_tables;
use crate::mysql::connect;
use anyhow::Result;

pub async fn optimize(settings: &Settings, schema: Option<String>, tables: Vec<String>) -> Result<()> {
    let selection = Selection::new(schema, tables)?;

    let mut session = connect(&settings.descriptor).await?;
    let outcome = optimize_tables(&mut session, &selection).await;
    let report = super::finish(session, outcome).await?;

    super::log_report("Optimized", &report);
    Ok(())
}
