//! `sync-preview render`: show a local file

use crate::cli::{format_from_args, normalize_options_from_args, render_options_from_args};
use crate::output::format_state;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use preview_shell::PreviewState;
use preview_source::{FileSource, RecordSource};
use std::path::PathBuf;

/// Read records from a file and format them
///
/// # Errors
/// Fails when the file is missing, unreadable, or not an array of objects
pub async fn run(args: &ArgMatches) -> Result<String> {
    let path = args
        .get_one::<PathBuf>("file")
        .context("no input file given")?;

    let outcome = FileSource::new(path)
        .fetch()
        .await
        .with_context(|| format!("failed to read records from {}", path.display()))?;
    let Some(records) = outcome.into_records() else {
        bail!("{} does not exist", path.display());
    };

    let state = PreviewState::from_records(&records, normalize_options_from_args(args)?);
    format_state(
        &state,
        format_from_args(args),
        &render_options_from_args(args),
        args.get_one::<String>("recipe").map(String::as_str),
    )
}
