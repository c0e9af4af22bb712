// ABOUTME: Command implementations for each CLI subcommand
// ABOUTME: Exports backup, restore, charset, engine, optimize, collations and engines

pub mod backup;
pub mod charset;
pub mod collations;
pub mod engine;
pub mod engines;
pub mod optimize;
pub mod restore;

pub use backup::{backup, run_backup};
pub use charset::charset;
pub use collations::collations;
pub use engine::engine;
pub use engines::engines;
pub use optimize::optimize;
pub use restore::restore;

use crate::maintenance::MaintenanceReport;
use crate::mysql::MySqlSession;
use anyhow::Result;

/// Close `session`, then hand back the outcome of the work done on it
///
/// A failure to close is only logged; the outcome decides the command result.
pub(crate) async fn finish<T>(session: MySqlSession, outcome: Result<T>) -> Result<T> {
    if let Err(e) = session.disconnect().await {
        tracing::warn!("⚠ {:#}", e);
    }
    outcome
}

pub(crate) fn log_report(action: &str, report: &MaintenanceReport) {
    if report.visited.is_empty() && report.skipped.is_empty() {
        tracing::warn!("⚠ No tables matched the selection");
        return;
    }

    tracing::info!("✓ {} {} table(s)", action, report.visited.len());
    if !report.skipped.is_empty() {
        tracing::info!(
            "  {} table(s) already up to date: {}",
            report.skipped.len(),
            report.skipped.join(", ")
        );
    }
}
