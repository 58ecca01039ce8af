//! Preview Source - configuration and sync output fetching
//!
//! - [`PreviewConfig`]: identifiers read once from a query string, URL or
//!   TOML file and passed explicitly to whoever needs them
//! - [`OutputFetcher`]: one HTTP GET per call, non-success status reported as
//!   "not ready"
//! - [`RecordSource`]: the seam the preview session polls, with HTTP and file
//!   implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use preview_source::{HttpSource, PreviewConfig, RecordSource};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PreviewConfig::from_query("?tenantId=t1&awsEndpoint=https%3A%2F%2Fbucket.example.com%2Fout.json");
//! let source = HttpSource::from_config(&config)?;
//!
//! match source.fetch().await?.into_records() {
//!     Some(records) => println!("{} records", records.len()),
//!     None => println!("no data yet"),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod source;

pub use config::{param, redact, PreviewConfig};
pub use error::{ConfigError, SourceError};
pub use fetch::{decode_records, parse_endpoint, FetchOutcome, OutputFetcher};
pub use source::{FileSource, HttpSource, RecordSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
