//! Preview session
//!
//! Owns the current [`PreviewState`] and refreshes it from a record source.
//! Refreshes may overlap; the most recently started one wins. Each refresh
//! takes a ticket, and its result is applied only if no later ticket has been
//! handed out by the time it finishes. Readers get `Arc` snapshots and never
//! see a half-applied update.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use preview_grid::{normalize_with, Grid, NormalizeOptions, RecordSet};
use preview_render::{no_data_message, render, DisplayTable, RenderOptions};
use preview_source::{FetchOutcome, RecordSource};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Why there is nothing to show
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NoDataReason {
    /// No refresh has finished yet
    NotFetched,
    /// The source reported its output is not there yet
    NotReady {
        /// HTTP status, when known
        status: Option<u16>,
    },
    /// The fetch failed
    FetchFailed {
        /// Error text
        message: String,
    },
    /// The output is an empty array
    EmptyRecordSet,
}

/// What the preview currently shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PreviewState {
    /// Placeholder
    NoData(NoDataReason),
    /// Header only
    Empty {
        /// Header-only grid
        grid: Grid,
    },
    /// Header and data
    Populated {
        /// Full grid
        grid: Grid,
        /// When the output was fetched
        fetched_at: DateTime<Utc>,
    },
}

impl Default for PreviewState {
    fn default() -> Self {
        Self::NoData(NoDataReason::NotFetched)
    }
}

impl PreviewState {
    /// State for a grid, split on whether it has data rows
    #[must_use]
    pub fn from_grid(grid: Grid, fetched_at: DateTime<Utc>) -> Self {
        if grid.has_data() {
            Self::Populated { grid, fetched_at }
        } else {
            Self::Empty { grid }
        }
    }

    /// State for freshly fetched records
    ///
    /// An empty record set has no header and becomes
    /// [`NoDataReason::EmptyRecordSet`].
    #[must_use]
    pub fn from_records(records: &RecordSet, options: NormalizeOptions) -> Self {
        match normalize_with(records, options) {
            Some(grid) => Self::from_grid(grid, Utc::now()),
            None => Self::NoData(NoDataReason::EmptyRecordSet),
        }
    }

    /// Grid, if any
    #[must_use]
    pub fn grid(&self) -> Option<&Grid> {
        match self {
            Self::NoData(_) => None,
            Self::Empty { grid } | Self::Populated { grid, .. } => Some(grid),
        }
    }

    /// Is this the placeholder state
    #[inline]
    #[must_use]
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData(_))
    }

    /// Fetch time for populated previews
    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Populated { fetched_at, .. } => Some(*fetched_at),
            _ => None,
        }
    }
}

/// Something ready to show
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewView {
    /// Placeholder message
    Placeholder(String),
    /// Bounded table
    Table(DisplayTable),
}

/// Turn a state into something to show
///
/// `label` names the data source in the placeholder message.
#[must_use]
pub fn render_view(state: &PreviewState, options: &RenderOptions, label: Option<&str>) -> PreviewView {
    match state.grid() {
        Some(grid) => PreviewView::Table(render(grid, options)),
        None => PreviewView::Placeholder(no_data_message(label)),
    }
}

/// Result of one refresh
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// The refresh result became the current state
    Applied(Arc<PreviewState>),
    /// A later refresh started before this one finished; result dropped
    Superseded {
        /// This refresh's ticket
        ticket: u64,
        /// Latest ticket at completion
        latest: u64,
    },
}

impl RefreshOutcome {
    /// Was the result applied
    #[inline]
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Current preview and how to refresh it
pub struct PreviewSession<S> {
    source: S,
    normalize: NormalizeOptions,
    state: RwLock<Arc<PreviewState>>,
    tickets: AtomicU64,
}

impl<S: RecordSource> PreviewSession<S> {
    /// Create session in the not-fetched state
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            normalize: NormalizeOptions::default(),
            state: RwLock::new(Arc::new(PreviewState::default())),
            tickets: AtomicU64::new(0),
        }
    }

    /// Set normalization options
    #[must_use]
    pub fn with_normalize(mut self, options: NormalizeOptions) -> Self {
        self.normalize = options;
        self
    }

    /// Record source
    #[inline]
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> Arc<PreviewState> {
        Arc::clone(&self.state.read())
    }

    /// Latest ticket handed out, zero before the first refresh
    #[must_use]
    pub fn latest_ticket(&self) -> u64 {
        self.tickets.load(Ordering::SeqCst)
    }

    /// Fetch once and apply the result unless superseded
    ///
    /// Fetch and shape failures become [`PreviewState::NoData`]; this never
    /// fails.
    pub async fn refresh(&self) -> RefreshOutcome {
        let ticket = self.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(ticket, source = %self.source.describe(), "refresh started");

        let next = match self.source.fetch().await {
            Ok(outcome) => self.state_for(outcome),
            Err(e) => {
                tracing::warn!(ticket, error = %e, "refresh failed");
                PreviewState::NoData(NoDataReason::FetchFailed {
                    message: e.to_string(),
                })
            }
        };

        let mut current = self.state.write();
        let latest = self.latest_ticket();
        if latest != ticket {
            tracing::debug!(ticket, latest, "refresh superseded, dropping result");
            return RefreshOutcome::Superseded { ticket, latest };
        }

        let next = Arc::new(next);
        *current = Arc::clone(&next);
        tracing::info!(
            ticket,
            rows = next.grid().map_or(0, Grid::data_row_count),
            "preview updated"
        );
        RefreshOutcome::Applied(next)
    }

    fn state_for(&self, outcome: FetchOutcome) -> PreviewState {
        match outcome {
            FetchOutcome::Ready(records) => PreviewState::from_records(&records, self.normalize),
            FetchOutcome::NotReady { status } => PreviewState::NoData(NoDataReason::NotReady { status }),
        }
    }
}

impl<S> std::fmt::Debug for PreviewSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSession")
            .field("normalize", &self.normalize)
            .field("state", &*self.state.read())
            .field("tickets", &self.tickets)
            .finish_non_exhaustive()
    }
}
