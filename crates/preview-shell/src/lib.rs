//! Preview Shell - session state, polling and sync orchestration
//!
//! - [`PreviewSession`]: current preview state, refreshed from a
//!   [`preview_source::RecordSource`] with latest-request-wins ordering
//! - [`wait_for_link`] / [`wait_for_records`]: bounded, cancellable polling
//! - [`IntegrationShell`]: seam for the embedding integration SDK
//! - [`SyncDriver`]: start a sync job, wait for it, refresh on completion
//!
//! # Example
//!
//! ```rust,no_run
//! use preview_render::RenderOptions;
//! use preview_shell::{render_view, PreviewSession, PreviewView};
//! use preview_source::FileSource;
//!
//! # async fn example() {
//! let session = PreviewSession::new(FileSource::new("out.json"));
//! session.refresh().await;
//!
//! match render_view(&session.state(), &RenderOptions::default(), Some("Contacts")) {
//!     PreviewView::Table(table) => print!("{}", table.to_text()),
//!     PreviewView::Placeholder(message) => println!("{message}"),
//! }
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod integration;
pub mod notice;
pub mod poll;
pub mod session;
pub mod sync;

pub use error::ShellError;
pub use integration::{
    check_linked, ensure_mounted, IntegrationShell, JobDetails, JobPoll, JobStatus, LinkedFlow,
    MountConfig, JOB_COMPLETED,
};
pub use notice::{Notice, NoticeLevel};
pub use poll::{retry_until, wait_for_link, wait_for_records, RetryPolicy};
pub use session::{render_view, NoDataReason, PreviewSession, PreviewState, PreviewView, RefreshOutcome};
pub use sync::{SyncDriver, SyncOutcome, SyncReport};

/// Cancellation handle accepted by the waits
pub use tokio_util::sync::CancellationToken;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
