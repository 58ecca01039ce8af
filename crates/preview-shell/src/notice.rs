//! User-facing notifications
//!
//! The shell does not display anything itself. Steps that the user should
//! hear about produce a [`Notice`], which is logged and handed back to the
//! caller to show however it likes.

use serde::Serialize;
use std::fmt;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Something went well
    Success,
    /// Something went wrong
    Error,
}

impl NoticeLevel {
    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A notification for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Short title
    pub title: String,
    /// Longer explanation
    pub body: String,
}

impl Notice {
    /// Create notice
    #[must_use]
    pub fn new(level: NoticeLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Create success notice
    #[inline]
    #[must_use]
    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, body)
    }

    /// Create error notice
    #[inline]
    #[must_use]
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, body)
    }

    /// A sync job was started
    #[must_use]
    pub fn syncing() -> Self {
        Self::success(
            "Syncing data",
            "Starting a data sync. This may take a few minutes!",
        )
    }

    /// A sync job completed
    #[must_use]
    pub fn data_synced(label: Option<&str>) -> Self {
        let label = label.unwrap_or("Source");
        Self::success(
            "Data synced",
            format!("{label} data has been synced successfully!"),
        )
    }

    /// A sync job finished in any state other than completed
    #[must_use]
    pub fn sync_failed() -> Self {
        Self::error(
            "Failed to sync",
            "There was an issue syncing the data, please contact support for help.",
        )
    }

    /// The user linked a data source
    #[must_use]
    pub fn source_linked(source: &str) -> Self {
        Self::success(
            format!("{source} linked"),
            "Woohoo! You've linked a source! Now you can sync your data.",
        )
    }

    /// Is this an error notice
    #[inline]
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    /// Emit through tracing
    pub fn log(&self) {
        match self.level {
            NoticeLevel::Success => tracing::info!(title = %self.title, "{}", self.body),
            NoticeLevel::Error => tracing::warn!(title = %self.title, "{}", self.body),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.body)
    }
}
