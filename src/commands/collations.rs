// ABOUTME: Collations command implementation - List server collations
// ABOUTME: Prints one collation name per line to standard output

use crate::config::Settings;
use crate::mysql::{connect, Session};
use anyhow::Result;

/// Print every collation the server supports, sorted
pub async fn collations(settings: &Settings) -> Result<()> {
    let mut session = connect(&settings.descriptor).await?;
    let outcome = session.list_collations().await;
    let collations = super::finish(session, outcome).await?;

    for collation in &collations {
        println!("{}", collation);
    }
    Ok(())
}
