// ABOUTME: Charset command implementation - Convert tables to a collation
// ABOUTME: Skips tables already on the collation, runs with foreign-key checks suspended

use crate::config::Settings;
use crate::filters::Selection;
use crate::maintenance::convert_charset;
use crate::mysql::connect;
use crate::utils::validate_identifier;
use anyhow::Result;

/// Convert the selected tables to `collation` and the character set it belongs to
///
/// # Errors
///
/// Validation errors (bad collation name, tables without a schema) are
/// returned before connecting. A failed `ALTER TABLE` stops the run; already
/// converted tables stay converted, and a re-run skips them.
pub async fn charset(
    settings: &Settings,
    collation: &str,
    schema: Option<String>,
    tables: Vec<String>,
) -> Result<()> {
    let selection = Selection::new(schema, tables)?;
    validate_identifier("collation", collation)?;

    let mut session = connect(&settings.descriptor).await?;
    let outcome = convert_charset(&mut session, &selection, collation).await;
    let report = super::finish(session, outcome).await?;

    super::log_report(&format!("Converted to {}:", collation), &report);
    Ok(())
}
