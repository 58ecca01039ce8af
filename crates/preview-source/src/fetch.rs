//! Sync output fetcher
//!
//! One GET per call. A non-success status means the sync output is not
//! there yet and is reported as [`FetchOutcome::NotReady`], not as an error.
//! No retry, timeout or caching happens here; polling belongs to the caller.

use crate::error::SourceError;
use preview_grid::RecordSet;
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Result of one fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Output is available
    Ready(RecordSet),
    /// Output is not available yet
    NotReady {
        /// HTTP status, when the source is HTTP
        status: Option<u16>,
    },
}

impl FetchOutcome {
    /// Records, if ready
    #[inline]
    #[must_use]
    pub fn into_records(self) -> Option<RecordSet> {
        match self {
            Self::Ready(records) => Some(records),
            Self::NotReady { .. } => None,
        }
    }

    /// Is output available
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Validate an endpoint string as an absolute http(s) URL
///
/// # Errors
/// `SourceError::InvalidEndpoint` if empty, unparsable, or not http(s)
pub fn parse_endpoint(endpoint: &str) -> Result<Url, SourceError> {
    let trimmed = endpoint.trim();
    if trimmed.is_empty() {
        return Err(SourceError::invalid_endpoint(endpoint, "endpoint is empty"));
    }

    let url = Url::parse(trimmed)
        .map_err(|e| SourceError::invalid_endpoint(endpoint, e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(SourceError::invalid_endpoint(
            endpoint,
            format!("unsupported scheme '{other}'"),
        )),
    }
}

/// Decode a response body into records
///
/// # Errors
/// - `SourceError::Decode` if the body is not JSON
/// - `SourceError::Shape` if it is not an array of objects
pub fn decode_records(origin: &str, body: &[u8]) -> Result<RecordSet, SourceError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| SourceError::decode(origin, e.to_string()))?;
    RecordSet::from_value(value).map_err(|source| SourceError::Shape {
        origin: origin.to_string(),
        source,
    })
}

/// HTTP fetcher for sync output
#[derive(Debug, Clone)]
pub struct OutputFetcher {
    client: Client,
}

impl OutputFetcher {
    /// Create fetcher with a default client
    ///
    /// # Errors
    /// `SourceError::Client` if the HTTP client cannot be built
    pub fn new() -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("sync-preview/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create fetcher around an existing client
    #[inline]
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetch the output at `endpoint`
    ///
    /// # Errors
    /// - `SourceError::InvalidEndpoint` before any request if `endpoint` is bad
    /// - `SourceError::Transport` if the request or body read fails
    /// - `SourceError::Decode` / `SourceError::Shape` for unusable bodies
    pub async fn fetch(&self, endpoint: &str) -> Result<FetchOutcome, SourceError> {
        let url = parse_endpoint(endpoint)?;
        tracing::debug!(%url, "fetching sync output");

        let transport = |source| SourceError::Transport {
            endpoint: endpoint.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            tracing::info!(status = status.as_u16(), "sync output not ready");
            return Ok(FetchOutcome::NotReady {
                status: Some(status.as_u16()),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        let records = decode_records(endpoint, &body)?;
        tracing::info!(records = records.len(), "fetched sync output");
        Ok(FetchOutcome::Ready(records))
    }
}
