//! `sync-preview config`: show resolved configuration

use crate::cli::config_from_args;
use anyhow::Result;
use clap::ArgMatches;
use preview_source::redact;

/// Format the resolved configuration with the API key redacted
///
/// Text output is TOML in the same shape `--config` reads.
///
/// # Errors
/// Fails when the configuration cannot be read or serialized
pub fn run(args: &ArgMatches) -> Result<String> {
    let config = config_from_args(args)?;
    let shown = config.clone().with_api_key(redact(&config.api_key));

    if args.get_flag("json") {
        Ok(serde_json::to_string_pretty(&shown)? + "\n")
    } else {
        Ok(toml::to_string_pretty(&shown)?)
    }
}
