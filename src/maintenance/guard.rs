// ABOUTME: Scoped suspension of foreign-key checks on a session
// ABOUTME: Re-enables the checks on success and on failure of the guarded work

use crate::mysql::Session;
use anyhow::{Context, Result};

const DISABLE_FOREIGN_KEY_CHECKS: &str = "SET foreign_key_checks = 0";
const ENABLE_FOREIGN_KEY_CHECKS: &str = "SET foreign_key_checks = 1";

/// Foreign-key checks suspended on a session
///
/// The guard holds the only mutable borrow of the session while the checks
/// are off, so nothing else can use that connection in the meantime. Finish
/// with [`ForeignKeyChecks::restore`], passing the outcome of the guarded work:
///
/// ```no_run
/// # use anyhow::Result;
/// # use mysql_admin_tools::maintenance::ForeignKeyChecks;
/// # use mysql_admin_tools::mysql::Session;
/// # async fn example<S: Session>(session: &mut S) -> Result<()> {
/// let mut guard = ForeignKeyChecks::suspend(session).await?;
/// let outcome = guard.session().execute("ALTER TABLE `shop`.`orders` ENGINE = InnoDB").await;
/// guard.restore(outcome).await
/// # }
/// ```
pub struct ForeignKeyChecks<'a, S: Session> {
    session: &'a mut S,
    restored: bool,
}

impl<'a, S: Session> ForeignKeyChecks<'a, S> {
    /// Disable foreign-key checks for the session
    pub async fn suspend(session: &'a mut S) -> Result<Self> {
        session
            .execute(DISABLE_FOREIGN_KEY_CHECKS)
            .await
            .context("Failed to disable foreign key checks")?;
        tracing::debug!("Foreign key checks disabled");

        Ok(Self {
            session,
            restored: false,
        })
    }

    /// The session the checks are suspended on
    pub fn session(&mut self) -> &mut S {
        self.session
    }

    /// Re-enable foreign-key checks, then hand back `outcome`
    ///
    /// When both the guarded work and the re-enable fail, the work's error is
    /// returned and the re-enable error is logged.
    pub async fn restore<T>(mut self, outcome: Result<T>) -> Result<T> {
        self.restored = true;
        let restored = self
            .session
            .execute(ENABLE_FOREIGN_KEY_CHECKS)
            .await
            .context("Failed to re-enable foreign key checks");

        match (outcome, restored) {
            (Ok(value), Ok(())) => {
                tracing::debug!("Foreign key checks re-enabled");
                Ok(value)
            }
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(restore_err)) => {
                tracing::error!("{:#}", restore_err);
                Err(e)
            }
        }
    }
}

impl<S: Session> Drop for ForeignKeyChecks<'_, S> {
    fn drop(&mut self) {
        if !self.restored {
            tracing::error!(
                "Foreign key checks were left disabled; the session must not be reused"
            );
        }
    }
}
