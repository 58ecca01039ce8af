//! Testing utilities for the sync preview workspace
//!
//! Shared fixtures, scripted record sources, and an in-memory integration
//! shell.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use preview_grid::RecordSet;
use preview_shell::{
    IntegrationShell, JobDetails, JobPoll, JobStatus, LinkedFlow, MountConfig, ShellError,
    JOB_COMPLETED,
};
use preview_source::{FetchOutcome, RecordSource, SourceError};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub fn contacts_value() -> Value {
    json!([
        {"id": 1, "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com",
         "address": {"city": "London"}, "active": true},
        {"id": 2, "first_name": "Lin", "last_name": "Wei", "email": null,
         "address": null, "active": false},
        {"id": 3, "first_name": "Grace", "last_name": "Hopper", "email": "grace@example.com",
         "address": {"city": "Arlington"}, "active": true}
    ])
}

pub fn contacts() -> RecordSet {
    RecordSet::from_value(contacts_value()).unwrap()
}

pub fn records(value: Value) -> RecordSet {
    RecordSet::from_value(value).unwrap()
}

/// `count` records with columns `id` and `name`
pub fn numbered(count: usize) -> RecordSet {
    records(Value::Array(
        (0..count)
            .map(|i| json!({"id": i, "name": format!("row-{i}")}))
            .collect(),
    ))
}

pub fn ready(records: RecordSet) -> Result<FetchOutcome, SourceError> {
    Ok(FetchOutcome::Ready(records))
}

pub fn not_ready() -> Result<FetchOutcome, SourceError> {
    Ok(FetchOutcome::NotReady { status: Some(404) })
}

pub fn decode_failure() -> Result<FetchOutcome, SourceError> {
    Err(SourceError::decode("scripted", "unexpected end of input"))
}

/// Source that returns the same records every time
#[derive(Debug, Clone)]
pub struct StaticSource {
    records: RecordSet,
}

impl StaticSource {
    pub fn new(records: RecordSet) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch(&self) -> Result<FetchOutcome, SourceError> {
        ready(self.records.clone())
    }

    fn describe(&self) -> String {
        "static".to_string()
    }
}

/// Source that yields pre-configured outcomes in order, with optional delays
///
/// Once the script runs out the last outcome repeats. An empty script is
/// never ready.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<(Duration, Result<FetchOutcome, SourceError>)>>,
    last: Mutex<Option<FetchOutcome>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn from_outcomes(outcomes: Vec<Result<FetchOutcome, SourceError>>) -> Self {
        Self::with_delays(outcomes.into_iter().map(|o| (Duration::ZERO, o)).collect())
    }

    pub fn with_delays(script: Vec<(Duration, Result<FetchOutcome, SourceError>)>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for ScriptedSource {
    async fn fetch(&self) -> Result<FetchOutcome, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().pop_front();

        match next {
            Some((delay, outcome)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                if let Ok(o) = &outcome {
                    *self.last.lock() = Some(o.clone());
                }
                outcome
            }
            None => Ok(self
                .last
                .lock()
                .clone()
                .unwrap_or(FetchOutcome::NotReady { status: None })),
        }
    }

    fn describe(&self) -> String {
        "scripted".to_string()
    }
}

/// In-memory integration shell
///
/// Mounting sets the mounted flag unless `mount_on_attempt` delays it; linked
/// flows become visible after `link_after` calls to `linked_flows`; every job
/// finishes with `job_status`.
#[derive(Debug)]
pub struct MockShell {
    mounted: AtomicBool,
    mount_calls: AtomicUsize,
    mounted_with: Mutex<Option<MountConfig>>,
    linked: Mutex<Vec<LinkedFlow>>,
    link_after: usize,
    link_checks: AtomicUsize,
    job_status: Mutex<String>,
    jobs: Mutex<Vec<(String, String)>>,
    fail_create: AtomicBool,
}

impl Default for MockShell {
    fn default() -> Self {
        Self {
            mounted: AtomicBool::new(false),
            mount_calls: AtomicUsize::new(0),
            mounted_with: Mutex::new(None),
            linked: Mutex::new(Vec::new()),
            link_after: 0,
            link_checks: AtomicUsize::new(0),
            job_status: Mutex::new(JOB_COMPLETED.to_string()),
            jobs: Mutex::new(Vec::new()),
            fail_create: AtomicBool::new(false),
        }
    }
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mounted() -> Self {
        let shell = Self::new();
        shell.mounted.store(true, Ordering::SeqCst);
        shell
    }

    pub fn with_linked_flows(self, ids: &[&str]) -> Self {
        *self.linked.lock() = ids
            .iter()
            .map(|id| LinkedFlow { id: (*id).to_string() })
            .collect();
        self
    }

    /// Linked flows are reported empty for the first `checks` calls
    pub fn with_link_after(mut self, checks: usize) -> Self {
        self.link_after = checks;
        self
    }

    pub fn with_job_status(self, status: &str) -> Self {
        *self.job_status.lock() = status.to_string();
        self
    }

    pub fn failing_create(self) -> Self {
        self.fail_create.store(true, Ordering::SeqCst);
        self
    }

    pub fn set_mounted(&self, mounted: bool) {
        self.mounted.store(mounted, Ordering::SeqCst);
    }

    pub fn mount_calls(&self) -> usize {
        self.mount_calls.load(Ordering::SeqCst)
    }

    pub fn mounted_with(&self) -> Option<MountConfig> {
        self.mounted_with.lock().clone()
    }

    pub fn link_checks(&self) -> usize {
        self.link_checks.load(Ordering::SeqCst)
    }

    /// `(flow_id, tenant_id)` of every created job
    pub fn jobs(&self) -> Vec<(String, String)> {
        self.jobs.lock().clone()
    }
}

#[async_trait]
impl IntegrationShell for MockShell {
    async fn mount(&self, config: &MountConfig) -> Result<(), ShellError> {
        self.mount_calls.fetch_add(1, Ordering::SeqCst);
        *self.mounted_with.lock() = Some(config.clone());
        self.mounted.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn has_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    async fn linked_flows(&self, _tenant_id: &str) -> Result<Vec<LinkedFlow>, ShellError> {
        let checks = self.link_checks.fetch_add(1, Ordering::SeqCst) + 1;
        if checks <= self.link_after {
            return Ok(Vec::new());
        }
        Ok(self.linked.lock().clone())
    }

    async fn create_job(&self, flow_id: &str, tenant_id: &str) -> Result<JobDetails, ShellError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(ShellError::sdk("createJob", "flow is not linked"));
        }
        self.jobs
            .lock()
            .push((flow_id.to_string(), tenant_id.to_string()));
        Ok(JobDetails {
            s3_root: format!("{tenant_id}/{flow_id}/job-{}", self.jobs.lock().len()),
        })
    }

    async fn poll_job(
        &self,
        _s3_root: &str,
        _flow_id: &str,
        _tenant_id: &str,
    ) -> Result<JobPoll, ShellError> {
        Ok(JobPoll {
            payload: JobStatus {
                status: self.job_status.lock().clone(),
            },
        })
    }
}
