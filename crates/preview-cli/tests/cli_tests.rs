//! End-to-end command tests
//!
//! Commands run through `dispatch` with parsed arguments; HTTP sources are
//! served by a local warp server and files come from temp dirs.

use pretty_assertions::assert_eq;
use preview_cli::build_cli;
use preview_cli::commands::{dispatch, watch};
use preview_shell::CancellationToken;
use serde_json::{json, Value};
use std::io::Write;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

const PLACEHOLDER: &str =
    "Once you connect your Contacts data and run a sync job, data will appear here!\n";

async fn run(argv: &[&str]) -> anyhow::Result<String> {
    let matches = build_cli().try_get_matches_from(argv)?;
    dispatch(&matches).await
}

fn contacts() -> Value {
    json!([
        {"id": 1, "name": "Ada", "email": "ada@example.com"},
        {"id": 2, "name": "Lin", "email": null}
    ])
}

/// Serves contacts at /out.json once it has been asked `ready_after` times
async fn serve(ready_after: usize) -> SocketAddr {
    let hits = Arc::new(AtomicUsize::new(0));
    let route = warp::path("out.json").map(move || {
        let n = hits.fetch_add(1, Ordering::SeqCst);
        if n < ready_after {
            warp::reply::with_status(warp::reply::json(&json!(null)), StatusCode::NOT_FOUND)
        } else {
            warp::reply::with_status(warp::reply::json(&contacts()), StatusCode::OK)
        }
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path.display().to_string()
}

#[tokio::test]
async fn preview_prints_text_table() {
    let addr = serve(0).await;
    let endpoint = format!("http://{addr}/out.json");

    let out = run(&["sync-preview", "preview", "--endpoint", &endpoint]).await.unwrap();
    assert_eq!(
        out,
        "id  name  email\n--  ----  ---------------\n1   Ada   ada@example.com\n2   Lin\n"
    );
}

#[tokio::test]
async fn preview_shows_placeholder_when_not_ready() {
    let addr = serve(usize::MAX).await;
    let query = format!(
        "?recipeId=Contacts&awsEndpoint=http%3A%2F%2F{}%2Fout.json",
        addr.to_string().replace(':', "%3A")
    );

    let out = run(&["sync-preview", "preview", "--query", &query]).await.unwrap();
    assert_eq!(out, PLACEHOLDER);
}

#[tokio::test]
async fn preview_json_reports_state() {
    let addr = serve(0).await;
    let endpoint = format!("http://{addr}/out.json");

    let out = run(&["sync-preview", "preview", "--endpoint", &endpoint, "--format", "json"])
        .await
        .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["state"], "populated");
    assert_eq!(
        value["grid"],
        json!([["id", "name", "email"], [1, "Ada", "ada@example.com"], [2, "Lin", null]])
    );
}

#[tokio::test]
async fn preview_without_endpoint_fails() {
    let err = run(&["sync-preview", "preview"]).await.unwrap_err();
    assert!(format!("{err:#}").contains("awsEndpoint"));
}

#[tokio::test]
async fn watch_polls_until_ready() {
    let addr = serve(2).await;
    let endpoint = format!("http://{addr}/out.json");
    let matches = build_cli()
        .try_get_matches_from([
            "sync-preview",
            "watch",
            "--endpoint",
            endpoint.as_str(),
            "--interval-ms",
            "5",
            "--rows",
            "2",
        ])
        .unwrap();
    let (_, args) = matches.subcommand().unwrap();

    let out = watch::run_with_cancel(args, &CancellationToken::new()).await.unwrap();
    assert_eq!(
        out,
        "id  name  email\n--  ----  ---------------\n1   Ada   ada@example.com\n(1 more rows not shown)\n"
    );
}

#[tokio::test]
async fn watch_gives_up_after_attempts() {
    let addr = serve(usize::MAX).await;
    let endpoint = format!("http://{addr}/out.json");

    let err = run(&[
        "sync-preview",
        "watch",
        "--endpoint",
        endpoint.as_str(),
        "--attempts",
        "2",
        "--interval-ms",
        "1",
    ])
    .await
    .unwrap_err();
    assert!(format!("{err:#}").contains("gave up"));
}

#[tokio::test]
async fn render_local_file_as_html() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "out.json", &contacts().to_string());

    let out = run(&["sync-preview", "render", &path, "--format", "html"]).await.unwrap();
    assert!(out.starts_with("<!DOCTYPE html>"));
    assert!(out.contains("ada@example.com"));
    assert!(out.contains("header"));
}

#[tokio::test]
async fn render_empty_array_shows_placeholder() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "out.json", "[]");

    let out = run(&["sync-preview", "render", &path, "--recipe", "Contacts"]).await.unwrap();
    assert_eq!(out, PLACEHOLDER);
}

#[tokio::test]
async fn render_rejects_non_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "out.json", r#"{"id": 1}"#);

    let err = run(&["sync-preview", "render", &path]).await.unwrap_err();
    assert!(format!("{err:#}").contains("failed to read records"));
}

#[tokio::test]
async fn render_missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json").display().to_string();

    let err = run(&["sync-preview", "render", &path]).await.unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}

#[tokio::test]
async fn config_layers_and_redacts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "preview.toml",
        "api_key = \"secret-api-key-9876\"\nenv_id = \"prod\"\ntenant_id = \"t-file\"\n",
    );

    let out = run(&[
        "sync-preview",
        "config",
        "--config",
        &path,
        "--query",
        "tenantId=t-query&flowId=f1",
        "--json",
    ])
    .await
    .unwrap();
    let value: Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["api_key"], "****9876");
    assert_eq!(value["env_id"], "prod");
    assert_eq!(value["tenant_id"], "t-query");
    assert_eq!(value["flow_id"], "f1");
    assert!(!out.contains("secret"));
}

#[tokio::test]
async fn config_text_is_toml() {
    let out = run(&["sync-preview", "config", "--tenant-id", "t1"]).await.unwrap();
    assert!(out.contains("tenant_id = \"t1\""));
}
