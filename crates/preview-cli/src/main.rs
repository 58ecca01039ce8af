//! `sync-preview` binary

use preview_cli::{build_cli, commands, logging};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    logging::init(matches.get_flag("verbose"), matches.get_flag("log-json"));

    match commands::dispatch(&matches).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
