//! Sync job orchestration
//!
//! Starts a sync job through the integration shell, waits for it to finish,
//! and refreshes the preview session when it completed. The notices raised
//! along the way are returned with the outcome.

use crate::error::ShellError;
use crate::integration::IntegrationShell;
use crate::notice::Notice;
use crate::session::{PreviewSession, RefreshOutcome};
use preview_source::{PreviewConfig, RecordSource};

/// How a sync run ended
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// Job completed and the session was refreshed
    Completed {
        /// Result of the refresh
        refresh: RefreshOutcome,
    },
    /// Job finished in some other status
    Failed {
        /// Status reported by the shell
        status: String,
    },
}

impl SyncOutcome {
    /// Did the job complete
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Outcome plus the notices raised
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// How the run ended
    pub outcome: SyncOutcome,
    /// Notices in the order raised
    pub notices: Vec<Notice>,
}

/// Runs sync jobs for one tenant and flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncDriver {
    tenant_id: String,
    flow_id: String,
    label: Option<String>,
}

impl SyncDriver {
    /// Create driver
    #[must_use]
    pub fn new(tenant_id: impl Into<String>, flow_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            flow_id: flow_id.into(),
            label: None,
        }
    }

    /// Create driver from configuration
    ///
    /// # Errors
    /// `ShellError::Config` when tenant or flow id is missing
    pub fn from_config(config: &PreviewConfig) -> Result<Self, ShellError> {
        let driver = Self::new(config.require_tenant()?, config.require_flow()?);
        Ok(match config.recipe_label() {
            Some(label) => driver.with_label(label),
            None => driver,
        })
    }

    /// Set the data source label used in notices
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Tenant id
    #[inline]
    #[must_use]
    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    /// Flow id
    #[inline]
    #[must_use]
    pub fn flow_id(&self) -> &str {
        &self.flow_id
    }

    /// Run one sync job
    ///
    /// # Errors
    /// - `ShellError::NotMounted` if the shell is not mounted; nothing is
    ///   started
    /// - Whatever the shell's `create_job` or `poll_job` returns
    pub async fn run<Sh, S>(
        &self,
        shell: &Sh,
        session: &PreviewSession<S>,
    ) -> Result<SyncReport, ShellError>
    where
        Sh: IntegrationShell + ?Sized,
        S: RecordSource,
    {
        if !shell.has_mounted() {
            return Err(ShellError::NotMounted);
        }

        let mut notices = Vec::new();
        let mut raise = |notice: Notice| {
            notice.log();
            notices.push(notice);
        };

        let job = shell.create_job(&self.flow_id, &self.tenant_id).await?;
        tracing::info!(flow_id = %self.flow_id, s3_root = %job.s3_root, "sync job started");
        raise(Notice::syncing());

        let poll = shell
            .poll_job(&job.s3_root, &self.flow_id, &self.tenant_id)
            .await?;

        let outcome = if poll.payload.is_completed() {
            raise(Notice::data_synced(self.label.as_deref()));
            SyncOutcome::Completed {
                refresh: session.refresh().await,
            }
        } else {
            tracing::warn!(status = %poll.payload.status, "sync job did not complete");
            raise(Notice::sync_failed());
            SyncOutcome::Failed {
                status: poll.payload.status,
            }
        };

        Ok(SyncReport { outcome, notices })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_config_requires_ids() {
        let err = SyncDriver::from_config(&PreviewConfig::new().with_flow_id("f")).unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));

        let driver = SyncDriver::from_config(
            &PreviewConfig::new()
                .with_tenant_id("t1")
                .with_flow_id("f9")
                .with_recipe_id("Contacts"),
        )
        .unwrap();
        assert_eq!(driver, SyncDriver::new("t1", "f9").with_label("Contacts"));
        assert_eq!(driver.tenant_id(), "t1");
        assert_eq!(driver.flow_id(), "f9");
    }
}
