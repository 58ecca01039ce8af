//! Record sources
//!
//! A [`RecordSource`] yields one fetch outcome per call. The HTTP source wraps
//! [`OutputFetcher`] with a configured endpoint; the file source reads a local
//! JSON document, which is how previews are rendered offline.

use crate::config::PreviewConfig;
use crate::error::SourceError;
use crate::fetch::{decode_records, parse_endpoint, FetchOutcome, OutputFetcher};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Something that can be asked for the current sync output
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch once
    async fn fetch(&self) -> Result<FetchOutcome, SourceError>;

    /// Human-readable origin, for logs
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for Arc<T> {
    async fn fetch(&self) -> Result<FetchOutcome, SourceError> {
        (**self).fetch().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// Sync output served over HTTP
#[derive(Debug, Clone)]
pub struct HttpSource {
    fetcher: OutputFetcher,
    endpoint: String,
}

impl HttpSource {
    /// Create source for `endpoint`
    #[inline]
    #[must_use]
    pub fn new(fetcher: OutputFetcher, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    /// Create source from the configured output endpoint
    ///
    /// # Errors
    /// - `SourceError::Config` if no endpoint is configured
    /// - `SourceError::InvalidEndpoint` if it is not an http(s) URL
    /// - `SourceError::Client` if the HTTP client cannot be built
    pub fn from_config(config: &PreviewConfig) -> Result<Self, SourceError> {
        let endpoint = config.require_endpoint()?;
        parse_endpoint(endpoint)?;
        Ok(Self::new(OutputFetcher::new()?, endpoint))
    }

    /// Endpoint this source reads
    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RecordSource for HttpSource {
    async fn fetch(&self) -> Result<FetchOutcome, SourceError> {
        self.fetcher.fetch(&self.endpoint).await
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

/// Sync output stored in a local JSON file
///
/// A missing file is "not ready", matching a missing HTTP object.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create source for `path`
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File this source reads
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordSource for FileSource {
    async fn fetch(&self) -> Result<FetchOutcome, SourceError> {
        let body = match tokio::fs::read(&self.path).await {
            Ok(body) => body,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "sync output file not present yet");
                return Ok(FetchOutcome::NotReady { status: None });
            }
            Err(source) => {
                return Err(SourceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let records = decode_records(&self.describe(), &body)?;
        tracing::info!(records = records.len(), path = %self.path.display(), "read sync output file");
        Ok(FetchOutcome::Ready(records))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn file_source_reads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"[{"id": 1, "name": "Ada"}]"#).unwrap();

        let source = FileSource::new(file.path());
        let outcome = source.fetch().await.unwrap();
        assert_eq!(outcome.into_records().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_not_ready() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("out.json"));
        assert_eq!(
            source.fetch().await.unwrap(),
            FetchOutcome::NotReady { status: None }
        );
    }

    #[tokio::test]
    async fn malformed_file_is_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[{").unwrap();

        let err = FileSource::new(file.path()).fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Decode { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn http_source_requires_endpoint() {
        let err = HttpSource::from_config(&PreviewConfig::new()).unwrap_err();
        assert!(matches!(err, SourceError::Config(_)));

        let err = HttpSource::from_config(&PreviewConfig::new().with_output_endpoint("s3://bucket/x"))
            .unwrap_err();
        assert!(matches!(err, SourceError::InvalidEndpoint { .. }));
    }
}
