//! `sync-preview watch`: poll until ready, then show

use crate::cli::{
    config_from_args, format_from_args, normalize_options_from_args, render_options_from_args,
    retry_policy_from_args,
};
use crate::output::format_state;
use anyhow::{Context, Result};
use clap::ArgMatches;
use preview_shell::{wait_for_records, CancellationToken, PreviewState};
use preview_source::HttpSource;

/// Poll with Ctrl-C cancelling the wait
///
/// # Errors
/// See [`run_with_cancel`]
pub async fn run(args: &ArgMatches) -> Result<String> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupted");
            on_interrupt.cancel();
        }
    });

    let result = run_with_cancel(args, &cancel).await;
    interrupt.abort();
    result
}

/// Poll the configured output until it is ready, then format it
///
/// # Errors
/// - No valid endpoint is configured
/// - The wait was cancelled or ran out of attempts
/// - The output cannot be used
pub async fn run_with_cancel(args: &ArgMatches, cancel: &CancellationToken) -> Result<String> {
    let config = config_from_args(args)?;
    let source = HttpSource::from_config(&config).context("cannot fetch sync output")?;
    let policy = retry_policy_from_args(args);

    let records = wait_for_records(&source, &policy, cancel)
        .await
        .with_context(|| format!("sync output at {} did not become ready", source.endpoint()))?;
    let state = PreviewState::from_records(&records, normalize_options_from_args(args)?);

    format_state(
        &state,
        format_from_args(args),
        &render_options_from_args(args),
        config.recipe_label(),
    )
}
