//! Subcommand implementations
//!
//! Each command returns the text to print so that it can be tested without
//! capturing stdout.

pub mod config;
pub mod preview;
pub mod render;
pub mod watch;

use anyhow::{bail, Result};
use clap::ArgMatches;

/// Run the selected subcommand
///
/// # Errors
/// Whatever the subcommand returns
pub async fn dispatch(matches: &ArgMatches) -> Result<String> {
    match matches.subcommand() {
        Some(("preview", args)) => preview::run(args).await,
        Some(("watch", args)) => watch::run(args).await,
        Some(("render", args)) => render::run(args).await,
        Some(("config", args)) => config::run(args),
        Some((other, _)) => bail!("unknown command '{other}'"),
        None => bail!("no command given"),
    }
}
