//! Command line definition and argument extraction

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use preview_grid::{NormalizeOptions, RowAlignment};
use preview_render::RenderOptions;
use preview_shell::RetryPolicy;
use preview_source::PreviewConfig;
use std::path::PathBuf;
use std::time::Duration;

/// Build the `sync-preview` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("sync-preview")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Preview the output of an integration data sync")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug details"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log as JSON lines"),
        )
        .subcommand(
            Command::new("preview")
                .about("Fetch the sync output once and show a preview")
                .args(config_args())
                .args(render_args()),
        )
        .subcommand(
            Command::new("watch")
                .about("Poll until the sync output is ready, then show a preview")
                .args(config_args())
                .args(render_args())
                .arg(
                    Arg::new("attempts")
                        .long("attempts")
                        .default_value("30")
                        .value_parser(value_parser!(u32))
                        .help("Fetch attempts before giving up"),
                )
                .arg(
                    Arg::new("interval-ms")
                        .long("interval-ms")
                        .default_value("1000")
                        .value_parser(value_parser!(u64))
                        .help("Pause between attempts in milliseconds"),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Show a preview of a local JSON file")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON array of records"),
                )
                .arg(
                    Arg::new("recipe")
                        .long("recipe")
                        .help("Data source label for the placeholder message"),
                )
                .args(render_args()),
        )
        .subcommand(
            Command::new("config")
                .about("Print the resolved configuration, API key redacted")
                .args(config_args())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
}

fn config_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(value_parser!(PathBuf))
            .help("TOML configuration file"),
        Arg::new("query")
            .long("query")
            .conflicts_with("url")
            .help("Query string carrying apiKey, envId, tenantId, flowId, awsEndpoint"),
        Arg::new("url")
            .long("url")
            .help("Page URL whose query carries the parameters"),
        Arg::new("api-key").long("api-key").help("Integration API key"),
        Arg::new("env-id").long("env-id").help("Integration environment id"),
        Arg::new("tenant-id").long("tenant-id").help("Tenant id"),
        Arg::new("flow-id").long("flow-id").help("Flow id"),
        Arg::new("endpoint")
            .long("endpoint")
            .help("URL of the sync output JSON"),
        Arg::new("recipe")
            .long("recipe")
            .help("Data source label"),
    ]
}

fn render_args() -> Vec<Arg> {
    vec![
        Arg::new("format")
            .long("format")
            .short('f')
            .default_value("text")
            .value_parser(value_parser!(OutputFormat))
            .help("Output format"),
        Arg::new("rows")
            .long("rows")
            .default_value("5")
            .value_parser(value_parser!(usize))
            .help("Rows to show, header included"),
        Arg::new("right-align-from")
            .long("right-align-from")
            .default_value("4")
            .value_parser(value_parser!(usize))
            .help("First column index to right-align"),
        Arg::new("no-right-align")
            .long("no-right-align")
            .action(ArgAction::SetTrue)
            .help("Left-align every column"),
        Arg::new("alignment")
            .long("alignment")
            .default_value("by-key")
            .value_parser(["by-key", "positional"])
            .help("How record fields are matched to header columns"),
    ]
}

/// Resolve configuration from file, query or URL, and individual flags
///
/// Later layers override earlier ones only where they are set.
///
/// # Errors
/// Fails when the file or URL cannot be read
pub fn config_from_args(args: &ArgMatches) -> Result<PreviewConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => PreviewConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => PreviewConfig::new(),
    };

    if let Some(query) = args.get_one::<String>("query") {
        config = PreviewConfig::from_query(query).with_defaults(&config);
    }
    if let Some(url) = args.get_one::<String>("url") {
        config = PreviewConfig::from_url(url)
            .with_context(|| format!("failed to read parameters from {url}"))?
            .with_defaults(&config);
    }

    let flag = |name: &str| args.get_one::<String>(name).cloned();
    if let Some(value) = flag("api-key") {
        config = config.with_api_key(value);
    }
    if let Some(value) = flag("env-id") {
        config = config.with_env_id(value);
    }
    if let Some(value) = flag("tenant-id") {
        config = config.with_tenant_id(value);
    }
    if let Some(value) = flag("flow-id") {
        config = config.with_flow_id(value);
    }
    if let Some(value) = flag("endpoint") {
        config = config.with_output_endpoint(value);
    }
    if let Some(value) = flag("recipe") {
        config = config.with_recipe_id(value);
    }

    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Render settings from the render flags
#[must_use]
pub fn render_options_from_args(args: &ArgMatches) -> RenderOptions {
    let mut options = RenderOptions::new();
    if let Some(rows) = args.get_one::<usize>("rows") {
        options = options.with_max_rows(*rows);
    }
    if args.get_flag("no-right-align") {
        options = options.without_right_align();
    } else if let Some(column) = args.get_one::<usize>("right-align-from") {
        options = options.with_right_align_from(Some(*column));
    }
    options
}

/// Normalization settings from the render flags
///
/// # Errors
/// Fails on an unknown alignment name
pub fn normalize_options_from_args(args: &ArgMatches) -> Result<NormalizeOptions> {
    let alignment = match args.get_one::<String>("alignment") {
        Some(name) => name.parse::<RowAlignment>()?,
        None => RowAlignment::default(),
    };
    Ok(NormalizeOptions::new().with_alignment(alignment))
}

/// Output format from the render flags
#[must_use]
pub fn format_from_args(args: &ArgMatches) -> OutputFormat {
    args.get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or_default()
}

/// Retry policy from the watch flags
#[must_use]
pub fn retry_policy_from_args(args: &ArgMatches) -> RetryPolicy {
    let mut policy = RetryPolicy::new();
    if let Some(attempts) = args.get_one::<u32>("attempts") {
        policy = policy.with_max_attempts(*attempts);
    }
    if let Some(millis) = args.get_one::<u64>("interval-ms") {
        policy = policy.with_interval(Duration::from_millis(*millis));
    }
    policy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(argv: &[&str]) -> ArgMatches {
        let matches = build_cli().try_get_matches_from(argv).unwrap();
        matches.subcommand().unwrap().1.clone()
    }

    #[test]
    fn command_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn flags_override_query() {
        let args = sub(&[
            "sync-preview",
            "preview",
            "--query",
            "?tenantId=t1&flowId=f1&awsEndpoint=https%3A%2F%2Fb.example.com%2Fo.json",
            "--flow-id",
            "f2",
        ]);
        let config = config_from_args(&args).unwrap();
        assert_eq!(config.tenant_id, "t1");
        assert_eq!(config.flow_id, "f2");
        assert_eq!(config.output_endpoint, "https://b.example.com/o.json");
    }

    #[test]
    fn render_defaults() {
        let args = sub(&["sync-preview", "preview"]);
        assert_eq!(render_options_from_args(&args), RenderOptions::default());
        assert_eq!(
            normalize_options_from_args(&args).unwrap(),
            NormalizeOptions::default()
        );
        assert_eq!(format_from_args(&args), OutputFormat::Text);
    }

    #[test]
    fn render_overrides() {
        let args = sub(&[
            "sync-preview",
            "render",
            "out.json",
            "--rows",
            "3",
            "--no-right-align",
            "--alignment",
            "positional",
            "--format",
            "html",
        ]);
        assert_eq!(
            render_options_from_args(&args),
            RenderOptions::new().with_max_rows(3).without_right_align()
        );
        assert_eq!(
            normalize_options_from_args(&args).unwrap().alignment,
            RowAlignment::Positional
        );
        assert_eq!(format_from_args(&args), OutputFormat::Html);
    }

    #[test]
    fn watch_policy() {
        let args = sub(&["sync-preview", "watch", "--attempts", "4", "--interval-ms", "250"]);
        assert_eq!(
            retry_policy_from_args(&args),
            RetryPolicy::new()
                .with_max_attempts(4)
                .with_interval(Duration::from_millis(250))
        );
    }

    #[test]
    fn rejects_unknown_alignment() {
        assert!(build_cli()
            .try_get_matches_from(["sync-preview", "preview", "--alignment", "sideways"])
            .is_err());
    }

    #[test]
    fn query_and_url_conflict() {
        assert!(build_cli()
            .try_get_matches_from(["sync-preview", "config", "--query", "a=1", "--url", "http://x/?a=1"])
            .is_err());
    }
}
