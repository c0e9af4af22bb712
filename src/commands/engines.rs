// ABOUTME: Engines command implementation - List available storage engines
// ABOUTME: Prints one engine name per line, leaving out engines the server cannot use

use crate::config::Settings;
use crate::mysql::{connect, Session};
use anyhow::Result;

pub async fn engines(settings: &Settings) -> Result<()> {
    let mut session = connect(&settings.descriptor).await?;
    let outcome = session.list_engines().await;
    let engines = super::finish(session, outcome).await?;

    for engine in &engines {
        println!("{}", engine);
    }
    Ok(())
}
