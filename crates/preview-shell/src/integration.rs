//! Integration shell boundary
//!
//! The embedding integration SDK mounts once with credentials, reports which
//! flows a tenant has linked, and runs sync jobs. [`IntegrationShell`] is the
//! seam for it; the helpers below hold the orchestration rules.

use crate::error::ShellError;
use async_trait::async_trait;
use preview_source::{redact, PreviewConfig};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Job status reported when a sync job finished successfully
pub const JOB_COMPLETED: &str = "JOB_COMPLETED";

/// Credentials used to mount the shell
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountConfig {
    /// Integration API key
    pub api_key: String,
    /// Integration environment id
    pub env_id: String,
}

impl MountConfig {
    /// Create mount config
    #[must_use]
    pub fn new(api_key: impl Into<String>, env_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            env_id: env_id.into(),
        }
    }

    /// Take credentials from a preview configuration
    #[must_use]
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self::new(config.api_key.clone(), config.env_id.clone())
    }
}

impl fmt::Debug for MountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MountConfig")
            .field("api_key", &redact(&self.api_key))
            .field("env_id", &self.env_id)
            .finish()
    }
}

/// A flow the tenant has linked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedFlow {
    /// Flow id
    pub id: String,
}

/// A started sync job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDetails {
    /// Storage root the job writes to, used to poll it
    pub s3_root: String,
}

/// Final status of a sync job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Status string, [`JOB_COMPLETED`] on success
    pub status: String,
}

impl JobStatus {
    /// Did the job complete
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == JOB_COMPLETED
    }
}

/// Response to a job poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPoll {
    /// Job status
    pub payload: JobStatus,
}

/// The embedding integration SDK
#[async_trait]
pub trait IntegrationShell: Send + Sync {
    /// Mount with credentials
    async fn mount(&self, config: &MountConfig) -> Result<(), ShellError>;

    /// Has mount completed
    fn has_mounted(&self) -> bool;

    /// Flows linked by `tenant_id`
    async fn linked_flows(&self, tenant_id: &str) -> Result<Vec<LinkedFlow>, ShellError>;

    /// Start a sync job
    async fn create_job(&self, flow_id: &str, tenant_id: &str) -> Result<JobDetails, ShellError>;

    /// Wait for a started job to finish
    async fn poll_job(
        &self,
        s3_root: &str,
        flow_id: &str,
        tenant_id: &str,
    ) -> Result<JobPoll, ShellError>;
}

#[async_trait]
impl<T: IntegrationShell + ?Sized> IntegrationShell for Arc<T> {
    async fn mount(&self, config: &MountConfig) -> Result<(), ShellError> {
        (**self).mount(config).await
    }

    fn has_mounted(&self) -> bool {
        (**self).has_mounted()
    }

    async fn linked_flows(&self, tenant_id: &str) -> Result<Vec<LinkedFlow>, ShellError> {
        (**self).linked_flows(tenant_id).await
    }

    async fn create_job(&self, flow_id: &str, tenant_id: &str) -> Result<JobDetails, ShellError> {
        (**self).create_job(flow_id, tenant_id).await
    }

    async fn poll_job(
        &self,
        s3_root: &str,
        flow_id: &str,
        tenant_id: &str,
    ) -> Result<JobPoll, ShellError> {
        (**self).poll_job(s3_root, flow_id, tenant_id).await
    }
}

/// Mount the shell unless it already is
///
/// Returns `true` when this call performed the mount.
///
/// # Errors
/// Whatever the shell's `mount` returns
pub async fn ensure_mounted<S>(shell: &S, config: &MountConfig) -> Result<bool, ShellError>
where
    S: IntegrationShell + ?Sized,
{
    if shell.has_mounted() {
        tracing::debug!("integration shell already mounted");
        return Ok(false);
    }

    tracing::info!(env_id = %config.env_id, "mounting integration shell");
    shell.mount(config).await?;
    Ok(true)
}

/// Has `tenant_id` linked `flow_id`
///
/// # Errors
/// - `ShellError::NotMounted` if the shell is not mounted
/// - Whatever the shell's `linked_flows` returns
pub async fn check_linked<S>(shell: &S, tenant_id: &str, flow_id: &str) -> Result<bool, ShellError>
where
    S: IntegrationShell + ?Sized,
{
    if !shell.has_mounted() {
        return Err(ShellError::NotMounted);
    }

    let flows = shell.linked_flows(tenant_id).await?;
    let linked = flows.iter().any(|flow| flow.id == flow_id);
    tracing::debug!(tenant_id, flow_id, linked_flows = flows.len(), linked, "checked linked flows");
    Ok(linked)
}
