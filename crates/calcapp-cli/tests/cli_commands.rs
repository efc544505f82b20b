#![allow(deprecated)]
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn calcapp(history_dir: &Path, server_url: &str) -> Command {
    let mut cmd = Command::cargo_bin("calcapp").expect("calcapp binary");
    cmd.env("CALCAPP_HISTORY_DIR", history_dir)
        .env("CALCAPP_SERVER_URL", server_url)
        .env("CALCAPP_CLIENT_TIMEOUT_SECS", "5")
        .env_remove("RUST_LOG");
    cmd
}

/// assert_cmd blocks; keep the mock server's runtime free to answer.
async fn run_blocking(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .expect("command task")
}

async fn mock_evaluate(server: &MockServer, expression: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path("/api/evaluate"))
        .and(body_json(json!({ "expression": expression })))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn stored_history(dir: &Path) -> Value {
    let raw = std::fs::read_to_string(dir.join("calcapp_history.json")).expect("history file");
    serde_json::from_str(&raw).expect("history JSON")
}

#[test]
fn examples_lists_all_groups() {
    let dir = TempDir::new().unwrap();
    calcapp(dir.path(), "http://127.0.0.1:9")
        .arg("examples")
        .assert()
        .success()
        .stdout(predicate::str::contains("Standard Math"))
        .stdout(predicate::str::contains("sqrt(144)"))
        .stdout(predicate::str::contains("Natural Language"))
        .stdout(predicate::str::contains("convert 45 degrees to radians"))
        .stdout(predicate::str::contains("Supported Operations"))
        .stdout(predicate::str::contains("sqrt()  Square root"))
        .stdout(predicate::str::contains("()      Parentheses grouping"));
}

#[test]
fn empty_history_lists_nothing() {
    let dir = TempDir::new().unwrap();
    calcapp(dir.path(), "http://127.0.0.1:9")
        .args(["history", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history yet."));

    calcapp(dir.path(), "http://127.0.0.1:9")
        .args(["history", "list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn eval_prints_result_and_records_history() {
    let server = MockServer::start().await;
    mock_evaluate(&server, "2 + 2 * 3", 200, json!({"result": "8"})).await;
    let dir = TempDir::new().unwrap();

    let mut cmd = calcapp(dir.path(), &server.uri());
    cmd.args(["eval", "  2 + 2 * 3  "]);
    run_blocking(cmd).await.success().stdout(predicate::str::diff("8\n"));

    let stored = stored_history(dir.path());
    let entries = stored.as_array().expect("array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["expression"], "2 + 2 * 3");
    assert_eq!(entries[0]["result"], "8");
    let id = entries[0]["id"].as_str().unwrap().to_string();

    let mut list = calcapp(dir.path(), &server.uri());
    list.args(["history", "list"]);
    run_blocking(list)
        .await
        .success()
        .stdout(predicate::str::contains("2 + 2 * 3 = 8"));

    let mut show = calcapp(dir.path(), &server.uri());
    show.args(["history", "show", &id]);
    run_blocking(show)
        .await
        .success()
        .stdout(predicate::str::contains("= 8"));
}

#[tokio::test(flavor = "multi_thread")]
async fn eval_failure_exits_one_without_history() {
    let server = MockServer::start().await;
    mock_evaluate(
        &server,
        "sqrt(-1)",
        500,
        json!({"error": "Unable to evaluate expression at this time."}),
    )
    .await;
    let dir = TempDir::new().unwrap();

    let mut cmd = calcapp(dir.path(), &server.uri());
    cmd.args(["eval", "sqrt(-1)"]);
    run_blocking(cmd)
        .await
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "Unable to evaluate expression at this time.",
        ));

    assert!(!dir.path().join("calcapp_history.json").exists());
}

#[test]
fn unreachable_server_is_a_transport_failure() {
    let dir = TempDir::new().unwrap();
    calcapp(dir.path(), "http://127.0.0.1:9")
        .args(["eval", "1 + 1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unable to evaluate expression."));
}

#[test]
fn blank_expression_is_rejected_locally() {
    let dir = TempDir::new().unwrap();
    calcapp(dir.path(), "http://127.0.0.1:9")
        .args(["eval", "   "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expression is required."));
}

#[test]
fn clear_writes_empty_log() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("calcapp_history.json"),
        r#"[{"id":"a","expression":"1 + 1","result":"2","evaluatedAt":"2025-01-01T00:00:00Z"}]"#,
    )
    .unwrap();

    calcapp(dir.path(), "http://127.0.0.1:9")
        .args(["history", "clear"])
        .assert()
        .success()
        .stderr(predicate::str::contains("History cleared."));

    assert_eq!(stored_history(dir.path()), json!([]));
}

#[test]
fn show_unknown_id_fails() {
    let dir = TempDir::new().unwrap();
    calcapp(dir.path(), "http://127.0.0.1:9")
        .args(["history", "show", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no history entry"));
}

#[test]
fn bad_timeout_is_config_error() {
    let dir = TempDir::new().unwrap();
    calcapp(dir.path(), "http://127.0.0.1:9")
        .env("CALCAPP_CLIENT_TIMEOUT_SECS", "soon")
        .args(["history", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("CALCAPP_CLIENT_TIMEOUT_SECS"));
}

#[tokio::test(flavor = "multi_thread")]
async fn repl_evaluates_and_replays() {
    let server = MockServer::start().await;
    mock_evaluate(&server, "25 plus 17", 200, json!({"result": "42"})).await;
    let dir = TempDir::new().unwrap();

    let mut cmd = calcapp(dir.path(), &server.uri());
    cmd.arg("repl")
        .write_stdin("25 plus 17\n\n:history\n:select 1\n:bogus\n:quit\n2 + 2\n");
    run_blocking(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("42\n"))
        .stdout(predicate::str::contains("  1  25 plus 17 = 42"))
        .stdout(predicate::str::contains("25 plus 17 = 42\n"))
        .stderr(predicate::str::contains("unknown command ':bogus'"));

    // Lines after :quit are never submitted.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
}
