// ABOUTME: Engine command implementation - Move tables to a storage engine
// ABOUTME: Skips tables already on the engine, runs with foreign-key checks suspended

use crate::config::Settings;
use crate::filters::Selection;
use crate::maintenance::convert_engine;
use crate::mysql::connect;
use crate::utils::validate_identifier;
use anyhow::Result;

/// Move the selected tables to storage `engine`
pub async fn engine(
    settings: &Settings,
    engine: &str,
    schema: Option<String>,
    tables: Vec<String>,
) -> Result<()> {
    let selection = Selection::new(schema, tables)?;
    validate_identifier("engine", engine)?;

    let mut session = connect(&settings.descriptor).await?;
    let outcome = convert_engine(&mut session, &selection, engine).await;
    let report = super::finish(session, outcome).await?;

    super::log_report(&format!("Moved to {}:", engine), &report);
    Ok(())
}
