//! Sync Preview CLI
//!
//! Library half of the `sync-preview` binary: the command definition, the
//! subcommands, and output formatting. Subcommands return their output as a
//! string; `main` prints it.

#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

pub use cli::build_cli;
pub use output::{format_state, OutputFormat};
