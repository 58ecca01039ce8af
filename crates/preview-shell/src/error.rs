//! Error types for the preview shell

use preview_source::{ConfigError, SourceError};

/// Errors from the integration shell, polling and sync orchestration
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The integration shell has not been mounted
    #[error("integration shell is not mounted")]
    NotMounted,

    /// An integration SDK call failed
    #[error("integration call '{operation}' failed: {message}")]
    Sdk {
        operation: &'static str,
        message: String,
    },

    /// A bounded wait ran out of attempts
    #[error("gave up waiting for {waiting_for} after {attempts} attempts")]
    RetriesExhausted {
        waiting_for: &'static str,
        attempts: u32,
    },

    /// A wait was cancelled before it finished
    #[error("cancelled while waiting for {waiting_for}")]
    Cancelled { waiting_for: &'static str },

    /// Fetching sync output failed
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Required configuration is missing
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ShellError {
    /// Create SDK error
    #[inline]
    #[must_use]
    pub fn sdk(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Sdk {
            operation,
            message: message.into(),
        }
    }

    /// Can the failed step be attempted again
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::NotMounted | Self::Sdk { .. } => true,
            Self::Source(e) => e.is_recoverable(),
            Self::RetriesExhausted { .. } | Self::Cancelled { .. } | Self::Config(_) => false,
        }
    }

    /// Was this a cancellation
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ShellError::NotMounted.is_retryable());
        assert!(ShellError::sdk("createJob", "timeout").is_retryable());
        assert!(ShellError::Source(SourceError::decode("x", "eof")).is_retryable());
        assert!(!ShellError::Config(ConfigError::missing("flowId")).is_retryable());
        assert!(!ShellError::Cancelled { waiting_for: "link" }.is_retryable());
        assert!(!ShellError::RetriesExhausted {
            waiting_for: "link",
            attempts: 3
        }
        .is_retryable());
    }

    #[test]
    fn messages() {
        assert_eq!(
            ShellError::sdk("pollJob", "boom").to_string(),
            "integration call 'pollJob' failed: boom"
        );
        assert_eq!(
            ShellError::RetriesExhausted {
                waiting_for: "linked flow",
                attempts: 5
            }
            .to_string(),
            "gave up waiting for linked flow after 5 attempts"
        );
        assert!(ShellError::Cancelled { waiting_for: "x" }.is_cancelled());
    }
}
