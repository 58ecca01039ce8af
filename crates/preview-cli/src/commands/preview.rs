//! `sync-preview preview`: fetch once and show

use crate::cli::{config_from_args, format_from_args, normalize_options_from_args, render_options_from_args};
use crate::output::format_state;
use anyhow::{Context, Result};
use clap::ArgMatches;
use preview_shell::PreviewSession;
use preview_source::HttpSource;

/// Fetch the configured output once and format it
///
/// A missing or unusable output shows the placeholder; only configuration
/// problems fail.
///
/// # Errors
/// Fails when no valid endpoint is configured
pub async fn run(args: &ArgMatches) -> Result<String> {
    let config = config_from_args(args)?;
    let source = HttpSource::from_config(&config).context("cannot fetch sync output")?;
    let session = PreviewSession::new(source).with_normalize(normalize_options_from_args(args)?);

    session.refresh().await;

    format_state(
        &session.state(),
        format_from_args(args),
        &render_options_from_args(args),
        config.recipe_label(),
    )
}
