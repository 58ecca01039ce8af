//! Error types for configuration and fetching
//!
//! Provides error handling for:
//! - Reading configuration (query string, URL, TOML file)
//! - Fetching sync output (endpoint, transport, decoding, shape)

use preview_grid::ShapeError;
use std::path::PathBuf;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A parameter needed by the caller is empty
    #[error("missing configuration parameter: {param}")]
    Missing { param: &'static str },

    /// URL could not be parsed
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// TOML parse failure
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create missing-parameter error
    #[inline]
    #[must_use]
    pub fn missing(param: &'static str) -> Self {
        Self::Missing { param }
    }
}

/// Errors while fetching sync output
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Endpoint is not an absolute http(s) URL
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Network or protocol failure
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Body is not valid JSON
    #[error("could not decode output from {origin}: {message}")]
    Decode { origin: String, message: String },

    /// Body is JSON but not an array of records
    #[error("unexpected output shape from {origin}: {source}")]
    Shape {
        origin: String,
        #[source]
        source: ShapeError,
    },

    /// Local source could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be built
    #[error("http client setup failed: {0}")]
    Client(String),

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SourceError {
    /// Whether trying again later may succeed
    ///
    /// Transport and read failures, and bodies that fail to decode (a
    /// partially written output), are transient.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Transport { .. } | Self::Decode { .. } | Self::Io { .. }
        )
    }

    /// Create invalid endpoint error
    pub fn invalid_endpoint(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEndpoint {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    /// Create decode error
    pub fn decode(origin: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            origin: origin.into(),
            message: message.into(),
        }
    }
}
